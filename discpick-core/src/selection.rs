use discpick_model::{Decision, PendingSelectionRequest, SubmitDecisionRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("candidate {index} is out of range for {len} candidates")]
    OutOfRange { index: usize, len: usize },

    #[error("request already resolved as {0}")]
    AlreadyResolved(Decision),
}

/// User intent for one pending request.
///
/// `resolved` is written once, at capture time; every later capture is a
/// no-op that returns `None`.
#[derive(Debug, Clone)]
pub struct SelectionState {
    request: PendingSelectionRequest,
    highlighted: usize,
    resolved: Option<Decision>,
}

impl SelectionState {
    pub fn new(request: PendingSelectionRequest) -> Self {
        Self {
            request,
            highlighted: 0,
            resolved: None,
        }
    }

    pub fn request(&self) -> &PendingSelectionRequest {
        &self.request
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn resolved(&self) -> Option<Decision> {
        self.resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Moves the cursor. Does not resolve anything.
    pub fn highlight(&mut self, index: usize) -> Result<(), SelectionError> {
        if let Some(decision) = self.resolved {
            return Err(SelectionError::AlreadyResolved(decision));
        }
        if index >= self.request.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: self.request.len(),
            });
        }
        self.highlighted = index;
        Ok(())
    }

    /// Captures `Chosen(highlighted)`.
    pub fn confirm(&mut self) -> Option<Decision> {
        self.capture(Decision::Chosen(self.highlighted))
    }

    /// Captures `Skip`, from the skip affordance or countdown expiry.
    pub fn skip(&mut self) -> Option<Decision> {
        self.capture(Decision::Skip)
    }

    fn capture(&mut self, decision: Decision) -> Option<Decision> {
        if self.resolved.is_some() {
            return None;
        }
        self.resolved = Some(decision);
        Some(decision)
    }

    /// Wire body for the captured decision, if any.
    pub fn submission(&self) -> Option<SubmitDecisionRequest> {
        let decision = self.resolved?;
        self.request.submission(decision).ok()
    }
}
