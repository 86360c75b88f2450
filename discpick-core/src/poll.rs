use discpick_model::{
    DiscId, DiscKind, ModelError, PendingSelectionRequest, PendingStatusResponse,
};

/// What one pending-status probe reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Nothing waits for a human.
    Idle,
    /// A disc of a handled kind waits for a human.
    Pending(PendingSelectionRequest),
    /// A disc waits, but its kind is not one this coordinator resolves.
    Unhandled { disc_id: DiscId, disc_kind: DiscKind },
    /// The backend said `pending` but the payload is unusable.
    Malformed {
        disc_id: Option<DiscId>,
        error: ModelError,
    },
}

impl Observation {
    /// The disc the backend reported as pending, if it named one.
    pub fn disc_id(&self) -> Option<&DiscId> {
        match self {
            Observation::Idle => None,
            Observation::Pending(request) => Some(request.disc_id()),
            Observation::Unhandled { disc_id, .. } => Some(disc_id),
            Observation::Malformed { disc_id, .. } => disc_id.as_ref(),
        }
    }
}

/// What the coordinator should do about an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum PollAction {
    Nothing,
    /// Open a new flow for this request.
    Surface(PendingSelectionRequest),
    /// The active flow's disc is still pending.
    KeepActive,
    /// The active flow's disc is no longer pending server-side.
    ExternallyResolved,
    /// The backend still reports the disc that was just settled locally.
    AwaitSettled,
}

/// Turns raw pending-status responses into [`Observation`]s and decides how
/// they affect the active flow.
#[derive(Debug, Clone)]
pub struct PollMonitor {
    disc_kinds: Vec<DiscKind>,
    default_budget_secs: u32,
}

impl PollMonitor {
    pub fn new(disc_kinds: Vec<DiscKind>, default_budget_secs: u32) -> Self {
        Self {
            disc_kinds,
            default_budget_secs,
        }
    }

    pub fn handles(&self, kind: &DiscKind) -> bool {
        self.disc_kinds.contains(kind)
    }

    pub fn observe(&self, status: PendingStatusResponse) -> Observation {
        if !status.pending {
            return Observation::Idle;
        }

        let disc_id = status.disc_id.clone();
        if let Some(kind) = &status.disc_type
            && !self.handles(kind)
        {
            return match disc_id {
                Some(disc_id) => Observation::Unhandled {
                    disc_id,
                    disc_kind: kind.clone(),
                },
                None => Observation::Malformed {
                    disc_id: None,
                    error: ModelError::MissingField("disc_id"),
                },
            };
        }

        match PendingSelectionRequest::from_status(status, self.default_budget_secs)
        {
            Ok(Some(request)) => Observation::Pending(request),
            Ok(None) => Observation::Idle,
            Err(error) => Observation::Malformed { disc_id, error },
        }
    }

    /// Applies the serialization rules: at most one active flow, the active
    /// disc is never surfaced twice, a flow ends only when the backend reports
    /// nothing pending, and a settled disc is held back until it clears.
    ///
    /// Other discs reported while a flow is active wait their turn; the
    /// active flow's countdown guarantees it ends.
    pub fn classify(
        observation: Observation,
        active: Option<&DiscId>,
        settled: Option<&DiscId>,
    ) -> PollAction {
        if matches!(observation, Observation::Malformed { .. }) {
            return PollAction::Nothing;
        }

        if active.is_some() {
            return match observation {
                Observation::Idle => PollAction::ExternallyResolved,
                _ => PollAction::KeepActive,
            };
        }

        if settled.is_some() && observation.disc_id() == settled {
            return PollAction::AwaitSettled;
        }

        match observation {
            Observation::Pending(request) => PollAction::Surface(request),
            _ => PollAction::Nothing,
        }
    }
}
