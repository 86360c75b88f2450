//! Wire types and the immutable domain model shared across discpick crates.
#![allow(missing_docs)]

pub mod candidate;
pub mod decision;
pub mod defaults;
pub mod disc;
pub mod error;
pub mod ids;
pub mod request;
pub mod wire;

pub use candidate::{
    Candidate, PLACEHOLDER_POSTER, PosterRef, ReleaseYear, TMDB_POSTER_BASE,
    UNKNOWN_TITLE,
};
pub use decision::Decision;
pub use defaults::{
    DEFAULT_DECISION_BUDGET_SECS, DEFAULT_POLL_INTERVAL,
    DEFAULT_URGENCY_THRESHOLD_SECS,
};
pub use disc::{DiscKind, MediaKind};
pub use error::ModelError;
pub use ids::DiscId;
pub use request::PendingSelectionRequest;
pub use wire::{
    PendingStatusResponse, RawCandidate, SubmitDecisionRequest,
    SubmitDecisionResponse, normalize_base_url,
};
