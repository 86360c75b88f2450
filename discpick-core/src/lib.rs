//! Disambiguation selection coordinator.
//!
//! Watches the ripping backend for discs whose metadata lookup returned
//! several plausible titles, shows the candidates for a bounded time, and
//! submits exactly one decision per disc: the user's pick, or a skip when
//! the user picks nothing in time.

pub mod backend;
pub mod coordinator;
pub mod countdown;
pub mod machine;
pub mod poll;
pub mod presenter;
pub mod selection;
pub mod submit;

pub use backend::{BackendError, HttpBackend, HttpBackendConfig, SelectionBackend};
pub use coordinator::{
    Command, Coordinator, CoordinatorClosed, CoordinatorHandle, CoordinatorSettings,
};
pub use countdown::Countdown;
pub use machine::{Effect, FlowId, Input, Phase, SelectionMachine, Snapshot};
pub use poll::{Observation, PollAction, PollMonitor};
pub use presenter::{Presenter, Urgency};
pub use selection::{SelectionError, SelectionState};
pub use submit::{Settlement, SubmitOutcome};
