//! The selection flow as an explicit state machine.
//!
//! `Idle → AwaitingDecision → Resolving → Idle`, with `RetryPending` between
//! a failed explicit choice and the user's retry. The machine is pure: it
//! consumes [`Input`]s and returns the [`Effect`]s the runtime must carry
//! out, which keeps every confirm/skip/expire interleaving testable without
//! timers or sockets.

use std::fmt;

use discpick_model::{
    Decision, DiscId, PendingSelectionRequest, PendingStatusResponse,
    SubmitDecisionRequest, SubmitDecisionResponse,
};
use tracing::{debug, info, warn};

use crate::backend::BackendError;
use crate::poll::{Observation, PollAction, PollMonitor};
use crate::presenter::Urgency;
use crate::selection::SelectionState;
use crate::submit::{self, Settlement, SubmitOutcome};

/// Identifies one flow. Events carrying an older id are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowId(u64);

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flow-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingDecision,
    /// A submission for this decision is in flight.
    Resolving(Decision),
    /// The submission failed; the decision waits for [`Input::Retry`].
    RetryPending(Decision),
}

#[derive(Debug)]
pub enum Input {
    Polled(Result<PendingStatusResponse, BackendError>),
    CountdownTick { flow: FlowId, remaining: u32 },
    CountdownExpired { flow: FlowId },
    Highlight(usize),
    Confirm,
    Skip,
    Retry,
    Submitted {
        flow: FlowId,
        result: Result<SubmitDecisionResponse, BackendError>,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Present {
        request: PendingSelectionRequest,
        highlighted: usize,
    },
    Highlight(usize),
    Countdown {
        remaining: u32,
        urgency: Urgency,
    },
    StartCountdown {
        flow: FlowId,
        budget_secs: u32,
    },
    CancelCountdown {
        flow: FlowId,
    },
    Submit {
        flow: FlowId,
        request: SubmitDecisionRequest,
    },
    ShowError(String),
    Notify(String),
    Close,
}

/// Read-only view of the machine, published after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub flow: Option<FlowId>,
    pub disc_id: Option<DiscId>,
    pub highlighted: Option<usize>,
    pub settled: Option<DiscId>,
}

impl Snapshot {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            flow: None,
            disc_id: None,
            highlighted: None,
            settled: None,
        }
    }
}

#[derive(Debug)]
struct ActiveFlow {
    id: FlowId,
    selection: SelectionState,
    phase: Phase,
}

#[derive(Debug, Clone, Copy)]
enum Intent {
    Confirm,
    Skip,
}

/// How a flow ended. Only a decision the backend took (or already had)
/// settles the disc; anything else leaves it eligible for a fresh flow.
#[derive(Debug, Clone, Copy)]
enum Teardown {
    Settled,
    Released,
}

#[derive(Debug)]
pub struct SelectionMachine {
    monitor: PollMonitor,
    urgency_threshold_secs: u32,
    next_flow: u64,
    active: Option<ActiveFlow>,
    settled: Option<DiscId>,
}

impl SelectionMachine {
    pub fn new(monitor: PollMonitor, urgency_threshold_secs: u32) -> Self {
        Self {
            monitor,
            urgency_threshold_secs,
            next_flow: 0,
            active: None,
            settled: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.active
            .as_ref()
            .map_or(Phase::Idle, |flow| flow.phase)
    }

    pub fn active_flow(&self) -> Option<FlowId> {
        self.active.as_ref().map(|flow| flow.id)
    }

    pub fn active_request(&self) -> Option<&PendingSelectionRequest> {
        self.active.as_ref().map(|flow| flow.selection.request())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            flow: self.active_flow(),
            disc_id: self
                .active
                .as_ref()
                .map(|flow| flow.selection.request().disc_id().clone()),
            highlighted: self
                .active
                .as_ref()
                .map(|flow| flow.selection.highlighted()),
            settled: self.settled.clone(),
        }
    }

    pub fn apply(&mut self, input: Input) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            Input::Polled(Ok(status)) => self.on_poll(status, &mut effects),
            Input::Polled(Err(err)) if err.is_transient() => {
                debug!(error = %err, "pending-status probe failed, retrying next tick");
            }
            Input::Polled(Err(err)) => {
                warn!(error = %err, "pending-status probe rejected, check backend settings");
            }
            Input::CountdownTick { flow, remaining } => {
                if self.awaiting(flow) {
                    effects.push(Effect::Countdown {
                        remaining,
                        urgency: Urgency::for_remaining(
                            remaining,
                            self.urgency_threshold_secs,
                        ),
                    });
                }
            }
            Input::CountdownExpired { flow } => {
                if self.is_current(flow) {
                    info!(%flow, "decision budget exhausted, skipping");
                    self.capture(Intent::Skip, &mut effects);
                }
            }
            Input::Highlight(index) => self.on_highlight(index, &mut effects),
            Input::Confirm => self.capture(Intent::Confirm, &mut effects),
            Input::Skip => self.capture(Intent::Skip, &mut effects),
            Input::Retry => self.on_retry(&mut effects),
            Input::Submitted { flow, result } => {
                self.on_submitted(flow, result, &mut effects)
            }
            Input::Shutdown => self.tear_down(Teardown::Released, &mut effects),
        }
        effects
    }

    fn is_current(&self, flow: FlowId) -> bool {
        self.active_flow() == Some(flow)
    }

    fn awaiting(&self, flow: FlowId) -> bool {
        self.active.as_ref().is_some_and(|active| {
            active.id == flow && active.phase == Phase::AwaitingDecision
        })
    }

    fn on_poll(&mut self, status: PendingStatusResponse, effects: &mut Vec<Effect>) {
        let observation = self.monitor.observe(status);
        match &observation {
            Observation::Malformed { disc_id, error } => {
                warn!(
                    disc_id = disc_id.as_ref().map(DiscId::as_str),
                    error = %error,
                    "ignoring malformed pending-status response"
                );
            }
            Observation::Unhandled { disc_id, disc_kind } if self.active.is_none() => {
                debug!(%disc_id, %disc_kind, "pending disc kind is not handled");
            }
            _ => {}
        }

        let malformed = matches!(observation, Observation::Malformed { .. });
        if self.active.is_none()
            && !malformed
            && observation.disc_id() != self.settled.as_ref()
        {
            self.settled = None;
        }

        let active_disc = self
            .active
            .as_ref()
            .map(|flow| flow.selection.request().disc_id().clone());
        match PollMonitor::classify(
            observation,
            active_disc.as_ref(),
            self.settled.as_ref(),
        ) {
            PollAction::Nothing | PollAction::KeepActive => {}
            PollAction::AwaitSettled => {
                debug!(
                    disc_id = self.settled.as_ref().map(DiscId::as_str),
                    "backend still reports the settled disc"
                );
            }
            PollAction::ExternallyResolved => {
                info!(
                    disc_id = active_disc.as_ref().map(DiscId::as_str),
                    "pending request resolved elsewhere"
                );
                self.tear_down(Teardown::Released, effects);
            }
            PollAction::Surface(request) => self.open(request, effects),
        }
    }

    fn open(&mut self, request: PendingSelectionRequest, effects: &mut Vec<Effect>) {
        self.next_flow += 1;
        let id = FlowId(self.next_flow);
        let budget_secs = request.decision_budget_seconds();

        info!(
            %id,
            disc_id = %request.disc_id(),
            disc_kind = %request.disc_kind(),
            candidates = request.len(),
            budget_secs,
            "awaiting disambiguation"
        );

        effects.push(Effect::Present {
            request: request.clone(),
            highlighted: 0,
        });
        effects.push(Effect::StartCountdown {
            flow: id,
            budget_secs,
        });
        effects.push(Effect::Countdown {
            remaining: budget_secs,
            urgency: Urgency::for_remaining(budget_secs, self.urgency_threshold_secs),
        });

        self.active = Some(ActiveFlow {
            id,
            selection: SelectionState::new(request),
            phase: Phase::AwaitingDecision,
        });
    }

    fn on_highlight(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(flow) = self.active.as_mut() else {
            return;
        };
        match flow.selection.highlight(index) {
            Ok(()) => effects.push(Effect::Highlight(index)),
            Err(err) => debug!(flow = %flow.id, error = %err, "highlight rejected"),
        }
    }

    /// Records the first decision for the active flow and submits it. Later
    /// captures fall through without effects.
    fn capture(&mut self, intent: Intent, effects: &mut Vec<Effect>) {
        let Some(flow) = self.active.as_mut() else {
            return;
        };
        let captured = match intent {
            Intent::Confirm => flow.selection.confirm(),
            Intent::Skip => flow.selection.skip(),
        };
        let Some(decision) = captured else {
            debug!(flow = %flow.id, ?intent, "request already resolved");
            return;
        };

        effects.push(Effect::CancelCountdown { flow: flow.id });
        self.submit(decision, effects);
    }

    fn submit(&mut self, decision: Decision, effects: &mut Vec<Effect>) {
        let Some(flow) = self.active.as_mut() else {
            return;
        };
        match flow.selection.submission() {
            Some(request) => {
                info!(flow = %flow.id, disc_id = %request.disc_id, %decision, "submitting decision");
                flow.phase = Phase::Resolving(decision);
                effects.push(Effect::Submit {
                    flow: flow.id,
                    request,
                });
            }
            None => {
                warn!(flow = %flow.id, %decision, "captured decision does not fit its request");
                self.tear_down(Teardown::Released, effects);
            }
        }
    }

    fn on_retry(&mut self, effects: &mut Vec<Effect>) {
        let Some(Phase::RetryPending(decision)) = self.active.as_ref().map(|f| f.phase) else {
            debug!("nothing to retry");
            return;
        };
        self.submit(decision, effects);
    }

    fn on_submitted(
        &mut self,
        flow_id: FlowId,
        result: Result<SubmitDecisionResponse, BackendError>,
        effects: &mut Vec<Effect>,
    ) {
        let Some(flow) = self.active.as_mut() else {
            debug!(flow = %flow_id, "submission completed after teardown");
            return;
        };
        let Phase::Resolving(decision) = flow.phase else {
            return;
        };
        if flow.id != flow_id {
            debug!(flow = %flow_id, "dropping completion for a previous flow");
            return;
        }

        let outcome = SubmitOutcome::from_result(result);
        match submit::settle(flow.selection.request(), decision, outcome) {
            Settlement::TearDown { notice, error } => {
                let teardown = match &error {
                    Some(error) => {
                        warn!(flow = %flow_id, %decision, error = %error, "submission failed, releasing disc");
                        Teardown::Released
                    }
                    None => Teardown::Settled,
                };
                self.tear_down(teardown, effects);
                effects.extend(error.map(Effect::ShowError));
                effects.extend(notice.map(Effect::Notify));
            }
            Settlement::KeepForRetry { error } => {
                warn!(flow = %flow_id, %decision, error = %error, "submission failed, awaiting retry");
                flow.phase = Phase::RetryPending(decision);
                effects.push(Effect::ShowError(error));
            }
        }
    }

    fn tear_down(&mut self, teardown: Teardown, effects: &mut Vec<Effect>) {
        let Some(flow) = self.active.take() else {
            return;
        };
        effects.push(Effect::CancelCountdown { flow: flow.id });
        effects.push(Effect::Close);

        self.settled = match teardown {
            Teardown::Settled => Some(flow.selection.request().disc_id().clone()),
            Teardown::Released => None,
        };
        debug!(flow = %flow.id, ?teardown, "flow torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discpick_model::{DiscKind, RawCandidate};

    const BUDGET: u32 = 60;

    fn machine() -> SelectionMachine {
        SelectionMachine::new(PollMonitor::new(DiscKind::video_kinds(), BUDGET), 10)
    }

    fn pending(disc_id: &str, candidates: usize) -> Input {
        Input::Polled(Ok(PendingStatusResponse {
            pending: true,
            disc_id: Some(disc_id.parse().unwrap()),
            disc_type: Some("bd-video".into()),
            results: (0..candidates)
                .map(|i| RawCandidate {
                    title: Some(format!("Candidate {i}")),
                    ..RawCandidate::default()
                })
                .collect(),
            timeout: Some(BUDGET),
            ..PendingStatusResponse::default()
        }))
    }

    fn idle() -> Input {
        Input::Polled(Ok(PendingStatusResponse::idle()))
    }

    fn accepted(flow: FlowId) -> Input {
        Input::Submitted {
            flow,
            result: Ok(SubmitDecisionResponse::accepted()),
        }
    }

    fn rejected(flow: FlowId) -> Input {
        Input::Submitted {
            flow,
            result: Ok(SubmitDecisionResponse::rejected("database locked")),
        }
    }

    fn submissions(effects: &[Effect]) -> Vec<Decision> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Submit { request, .. } => Some(request.selection),
                _ => None,
            })
            .collect()
    }

    fn opened(machine: &mut SelectionMachine) -> FlowId {
        machine.apply(pending("D1", 2));
        machine.active_flow().expect("flow opened")
    }

    #[test]
    fn pending_status_opens_a_flow() {
        let mut machine = machine();
        let effects = machine.apply(pending("D1", 2));

        let flow = machine.active_flow().unwrap();
        assert_eq!(machine.phase(), Phase::AwaitingDecision);
        assert!(matches!(
            &effects[0],
            Effect::Present { request, highlighted: 0 } if request.len() == 2
        ));
        assert_eq!(
            effects[1],
            Effect::StartCountdown {
                flow,
                budget_secs: BUDGET
            }
        );
        assert_eq!(
            effects[2],
            Effect::Countdown {
                remaining: BUDGET,
                urgency: Urgency::Calm
            }
        );
    }

    #[test]
    fn scenario_a_highlight_confirm_accept() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        assert_eq!(machine.apply(Input::Highlight(1)), vec![Effect::Highlight(1)]);
        let effects = machine.apply(Input::Confirm);
        assert_eq!(effects[0], Effect::CancelCountdown { flow });
        let Effect::Submit { request, .. } = &effects[1] else {
            panic!("expected submit, got {effects:?}");
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({"disc_id": "D1", "disc_type": "bd-video", "selection": 1})
        );
        assert_eq!(machine.phase(), Phase::Resolving(Decision::Chosen(1)));

        let effects = machine.apply(accepted(flow));
        assert_eq!(effects[..2], [Effect::CancelCountdown { flow }, Effect::Close]);
        assert!(matches!(&effects[2], Effect::Notify(message) if message.contains("Candidate 1")));
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn scenario_b_expiry_submits_skip() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        let effects = machine.apply(Input::CountdownExpired { flow });
        let Some(Effect::Submit { request, .. }) = effects.last() else {
            panic!("expected submit, got {effects:?}");
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({"disc_id": "D1", "disc_type": "bd-video", "selection": "skip"})
        );
    }

    #[test]
    fn scenario_c_failed_choice_stays_active_and_retries_same_decision() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        machine.apply(Input::Highlight(1));
        machine.apply(Input::Confirm);

        let effects = machine.apply(rejected(flow));
        assert!(matches!(&effects[..], [Effect::ShowError(message)] if message.contains("database locked")));
        assert_eq!(machine.phase(), Phase::RetryPending(Decision::Chosen(1)));

        // A stray expiry or skip cannot replace the captured choice.
        assert!(machine.apply(Input::CountdownExpired { flow }).is_empty());
        assert!(machine.apply(Input::Skip).is_empty());

        let effects = machine.apply(Input::Retry);
        assert_eq!(submissions(&effects), vec![Decision::Chosen(1)]);
        machine.apply(accepted(flow));
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn scenario_d_same_disc_is_a_no_op() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        assert!(machine.apply(pending("D1", 3)).is_empty());
        assert_eq!(machine.active_flow(), Some(flow));
        assert_eq!(machine.active_request().unwrap().len(), 2);
    }

    #[test]
    fn every_ordering_of_confirm_skip_expire_submits_once() {
        #[derive(Clone, Copy, Debug)]
        enum Race {
            Confirm,
            Skip,
            Expire,
        }
        let orderings = [
            [Race::Confirm, Race::Skip, Race::Expire],
            [Race::Confirm, Race::Expire, Race::Skip],
            [Race::Skip, Race::Confirm, Race::Expire],
            [Race::Skip, Race::Expire, Race::Confirm],
            [Race::Expire, Race::Confirm, Race::Skip],
            [Race::Expire, Race::Skip, Race::Confirm],
        ];

        for ordering in orderings {
            let mut machine = machine();
            let flow = opened(&mut machine);
            let mut submitted = Vec::new();
            for event in ordering {
                let input = match event {
                    Race::Confirm => Input::Confirm,
                    Race::Skip => Input::Skip,
                    Race::Expire => Input::CountdownExpired { flow },
                };
                submitted.extend(submissions(&machine.apply(input)));
            }
            let expected = match ordering[0] {
                Race::Confirm => Decision::Chosen(0),
                Race::Skip | Race::Expire => Decision::Skip,
            };
            assert_eq!(submitted, vec![expected], "ordering {ordering:?}");
        }
    }

    #[test]
    fn failed_skip_fails_open_and_reopens_a_still_pending_disc() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        machine.apply(Input::CountdownExpired { flow });

        let effects = machine.apply(Input::Submitted {
            flow,
            result: Err(BackendError::Transport {
                url: "http://ripper/api/metadata/select".into(),
                message: "connection refused".into(),
            }),
        });
        assert_eq!(effects[..2], [Effect::CancelCountdown { flow }, Effect::Close]);
        assert!(matches!(&effects[2], Effect::ShowError(_)));
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.snapshot().settled, None);

        // The backend still waits on D1: a fresh flow with a full budget.
        let effects = machine.apply(pending("D1", 2));
        let reopened = machine.active_flow().expect("disc surfaced again");
        assert!(reopened > flow);
        assert!(effects.contains(&Effect::StartCountdown {
            flow: reopened,
            budget_secs: BUDGET,
        }));

        // Left alone it expires again, so the disc cannot block forever.
        let effects = machine.apply(Input::CountdownExpired { flow: reopened });
        assert_eq!(submissions(&effects), vec![Decision::Skip]);
    }

    #[test]
    fn stale_submission_tears_down_silently() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        machine.apply(Input::Confirm);

        let effects = machine.apply(Input::Submitted {
            flow,
            result: Err(BackendError::Stale {
                disc_id: "D1".into(),
            }),
        });
        assert_eq!(effects, vec![Effect::CancelCountdown { flow }, Effect::Close]);
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn external_resolution_cancels_countdown_and_closes() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        let effects = machine.apply(idle());
        assert_eq!(effects, vec![Effect::CancelCountdown { flow }, Effect::Close]);
        assert_eq!(machine.snapshot(), Snapshot::idle());

        // Events still queued for the old flow do nothing.
        assert!(machine.apply(Input::CountdownTick { flow, remaining: 5 }).is_empty());
        assert!(machine.apply(Input::CountdownExpired { flow }).is_empty());
        assert!(machine.apply(accepted(flow)).is_empty());
    }

    #[test]
    fn second_disc_waits_for_the_first() {
        let mut machine = machine();
        let first = opened(&mut machine);

        // Alternating reports never disturb the D1 flow.
        for disc in ["D2", "D1", "D2", "D2"] {
            assert!(machine.apply(pending(disc, 2)).is_empty(), "report for {disc}");
            assert_eq!(machine.active_flow(), Some(first));
        }
        assert_eq!(machine.snapshot().disc_id.unwrap().as_str(), "D1");

        // D1's countdown still runs out and resolves it.
        machine.apply(Input::CountdownExpired { flow: first });
        machine.apply(accepted(first));
        assert_eq!(machine.phase(), Phase::Idle);

        machine.apply(pending("D2", 2));
        let second = machine.active_flow().unwrap();
        assert!(second > first);
        assert_eq!(machine.snapshot().disc_id.unwrap().as_str(), "D2");

        // A tick for the old flow is ignored.
        assert!(machine.apply(Input::CountdownTick { flow: first, remaining: 3 }).is_empty());
    }

    #[test]
    fn unhandled_disc_kind_leaves_the_active_flow_alone() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        let audio = Input::Polled(Ok(PendingStatusResponse {
            pending: true,
            disc_id: Some("CD9".parse().unwrap()),
            disc_type: Some("audio-cd".into()),
            results: vec![RawCandidate {
                title: Some("Kind of Blue".into()),
                ..RawCandidate::default()
            }],
            ..PendingStatusResponse::default()
        }));
        assert!(machine.apply(audio).is_empty());
        assert_eq!(machine.active_flow(), Some(flow));
        assert_eq!(machine.phase(), Phase::AwaitingDecision);

        // Only a report of nothing pending ends it from outside.
        assert_eq!(
            machine.apply(idle()),
            vec![Effect::CancelCountdown { flow }, Effect::Close]
        );
    }

    #[test]
    fn accepted_disc_is_not_resurfaced_while_backend_lags() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        machine.apply(Input::Skip);
        machine.apply(accepted(flow));

        assert!(machine.apply(pending("D1", 2)).is_empty());
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(machine.apply(pending("D2", 2)).len() >= 3);
        assert_eq!(machine.snapshot().settled, None);
    }

    #[test]
    fn ticks_escalate_urgency_and_stop_after_capture() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        assert_eq!(
            machine.apply(Input::CountdownTick { flow, remaining: 11 }),
            vec![Effect::Countdown {
                remaining: 11,
                urgency: Urgency::Calm
            }]
        );
        assert_eq!(
            machine.apply(Input::CountdownTick { flow, remaining: 10 }),
            vec![Effect::Countdown {
                remaining: 10,
                urgency: Urgency::Urgent
            }]
        );

        machine.apply(Input::Confirm);
        assert!(machine.apply(Input::CountdownTick { flow, remaining: 9 }).is_empty());
    }

    #[test]
    fn out_of_range_highlight_and_idle_commands_are_ignored() {
        let mut machine = machine();
        assert!(machine.apply(Input::Confirm).is_empty());
        assert!(machine.apply(Input::Retry).is_empty());
        assert!(machine.apply(Input::Highlight(0)).is_empty());

        opened(&mut machine);
        assert!(machine.apply(Input::Highlight(7)).is_empty());
        assert_eq!(machine.snapshot().highlighted, Some(0));
    }

    #[test]
    fn probe_failures_and_malformed_payloads_change_nothing() {
        let mut machine = machine();
        let flow = opened(&mut machine);

        let failure = Input::Polled(Err(BackendError::Status {
            url: "http://ripper/api/metadata/pending".into(),
            status: 502,
            body: "bad gateway".into(),
        }));
        assert!(machine.apply(failure).is_empty());
        let misrouted = Input::Polled(Err(BackendError::Status {
            url: "http://ripper/api/pending".into(),
            status: 404,
            body: String::new(),
        }));
        assert!(machine.apply(misrouted).is_empty());
        assert!(machine.apply(pending("D2", 0)).is_empty());
        assert_eq!(machine.active_flow(), Some(flow));
    }

    #[test]
    fn shutdown_tears_down_the_active_flow() {
        let mut machine = machine();
        let flow = opened(&mut machine);
        assert_eq!(
            machine.apply(Input::Shutdown),
            vec![Effect::CancelCountdown { flow }, Effect::Close]
        );
        assert!(machine.apply(Input::Shutdown).is_empty());
    }
}
