use crate::candidate::Candidate;
use crate::decision::Decision;
use crate::disc::{DiscKind, MediaKind};
use crate::error::{ModelError, Result};
use crate::ids::DiscId;
use crate::wire::{PendingStatusResponse, SubmitDecisionRequest};

/// Immutable snapshot of one disc blocked on human disambiguation.
///
/// A newer request for the same disc replaces this one wholesale; nothing
/// is ever merged into an existing snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelectionRequest {
    disc_id: DiscId,
    disc_kind: DiscKind,
    media_kind: MediaKind,
    candidates: Vec<Candidate>,
    decision_budget_seconds: u32,
}

impl PendingSelectionRequest {
    pub fn new(
        disc_id: DiscId,
        disc_kind: DiscKind,
        media_kind: MediaKind,
        candidates: Vec<Candidate>,
        decision_budget_seconds: u32,
    ) -> Result<Self> {
        if candidates.is_empty() {
            return Err(ModelError::NoCandidates {
                disc_id: disc_id.to_string(),
            });
        }
        if decision_budget_seconds == 0 {
            return Err(ModelError::InvalidBudget);
        }
        Ok(Self {
            disc_id,
            disc_kind,
            media_kind,
            candidates,
            decision_budget_seconds,
        })
    }

    /// Builds a request from a status probe.
    ///
    /// Returns `Ok(None)` when the backend reports nothing pending. A missing
    /// or zero `timeout` falls back to `default_budget_secs`.
    pub fn from_status(
        status: PendingStatusResponse,
        default_budget_secs: u32,
    ) -> Result<Option<Self>> {
        if !status.pending {
            return Ok(None);
        }

        let disc_id = status.disc_id.ok_or(ModelError::MissingField("disc_id"))?;
        let disc_kind =
            status.disc_type.ok_or(ModelError::MissingField("disc_type"))?;
        let budget = status
            .timeout
            .filter(|secs| *secs > 0)
            .unwrap_or(default_budget_secs);
        let candidates = status.results.into_iter().map(Candidate::from).collect();

        Self::new(
            disc_id,
            disc_kind,
            status.media_type.unwrap_or_default(),
            candidates,
            budget,
        )
        .map(Some)
    }

    pub fn disc_id(&self) -> &DiscId {
        &self.disc_id
    }

    pub fn disc_kind(&self) -> &DiscKind {
        &self.disc_kind
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false for a constructed request; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn decision_budget_seconds(&self) -> u32 {
        self.decision_budget_seconds
    }

    /// Validates `decision` against this request and wraps it for the wire.
    pub fn submission(&self, decision: Decision) -> Result<SubmitDecisionRequest> {
        if let Decision::Chosen(index) = decision
            && index >= self.len()
        {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(SubmitDecisionRequest {
            disc_id: self.disc_id.clone(),
            disc_type: self.disc_kind.clone(),
            selection: decision,
        })
    }
}
