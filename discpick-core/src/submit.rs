use discpick_model::{Decision, PendingSelectionRequest, SubmitDecisionResponse};

use crate::backend::BackendError;

/// How the backend answered one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// The backend no longer tracks the disc.
    Stale,
    Failed(String),
}

impl SubmitOutcome {
    pub fn from_result(result: Result<SubmitDecisionResponse, BackendError>) -> Self {
        match result {
            Ok(response) if response.success => SubmitOutcome::Accepted,
            Ok(response) => SubmitOutcome::Failed(
                response
                    .message
                    .unwrap_or_else(|| "backend rejected the selection".to_string()),
            ),
            Err(BackendError::Stale { .. }) => SubmitOutcome::Stale,
            Err(err) => SubmitOutcome::Failed(err.to_string()),
        }
    }
}

/// What to do with the flow once a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    TearDown {
        notice: Option<String>,
        error: Option<String>,
    },
    /// Keep the flow and its captured decision for a manual retry.
    KeepForRetry { error: String },
}

/// Explicit choices fail closed, skips fail open, stale counts as done.
pub fn settle(
    request: &PendingSelectionRequest,
    decision: Decision,
    outcome: SubmitOutcome,
) -> Settlement {
    match outcome {
        SubmitOutcome::Accepted => Settlement::TearDown {
            notice: Some(acceptance_notice(request, decision)),
            error: None,
        },
        SubmitOutcome::Stale => Settlement::TearDown {
            notice: None,
            error: None,
        },
        SubmitOutcome::Failed(reason) if decision.fails_closed() => {
            Settlement::KeepForRetry {
                error: format!("Failed to submit selection: {reason}"),
            }
        }
        SubmitOutcome::Failed(reason) => Settlement::TearDown {
            notice: None,
            error: Some(format!("Failed to submit skip: {reason}")),
        },
    }
}

fn acceptance_notice(request: &PendingSelectionRequest, decision: Decision) -> String {
    match decision.chosen_index().and_then(|index| request.candidate(index)) {
        Some(candidate) => {
            format!("Selected {}, writing metadata", candidate.label())
        }
        None => format!(
            "Metadata skipped for disc {}, continuing with generic names",
            request.disc_id()
        ),
    }
}
