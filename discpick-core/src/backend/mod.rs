//! Backend seam: the two endpoints the coordinator consumes.

mod http;

pub use http::{HttpBackend, HttpBackendConfig};

use async_trait::async_trait;
use discpick_model::{
    PendingStatusResponse, SubmitDecisionRequest, SubmitDecisionResponse,
};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The backend no longer knows the disc, typically because it already
    /// resolved it on its own timeout or through another client.
    #[error("backend no longer tracks disc {disc_id}")]
    Stale { disc_id: String },
}

impl BackendError {
    /// Failures the next poll or a manual retry can recover from.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Transport { .. } => true,
            BackendError::Status { status, .. } => *status >= 500,
            BackendError::Decode { .. } | BackendError::Stale { .. } => false,
        }
    }
}

/// The ripping backend as seen by the coordinator.
#[async_trait]
pub trait SelectionBackend: Send + Sync + Debug {
    /// `GET pending-status`
    async fn pending_status(&self) -> Result<PendingStatusResponse, BackendError>;

    /// `POST submit-decision`
    async fn submit_decision(
        &self,
        request: &SubmitDecisionRequest,
    ) -> Result<SubmitDecisionResponse, BackendError>;
}

#[async_trait]
impl<T: SelectionBackend + ?Sized> SelectionBackend for Arc<T> {
    async fn pending_status(&self) -> Result<PendingStatusResponse, BackendError> {
        (**self).pending_status().await
    }

    async fn submit_decision(
        &self,
        request: &SubmitDecisionRequest,
    ) -> Result<SubmitDecisionResponse, BackendError> {
        (**self).submit_decision(request).await
    }
}
