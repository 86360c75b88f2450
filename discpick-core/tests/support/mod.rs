#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use discpick_core::{
    BackendError, CoordinatorHandle, Presenter, SelectionBackend, Snapshot, Urgency,
};
use discpick_model::{
    PendingSelectionRequest, PendingStatusResponse, RawCandidate,
    SubmitDecisionRequest, SubmitDecisionResponse,
};
use tokio::time;

pub fn pending_status(disc_id: &str, titles: &[&str], budget_secs: u32) -> PendingStatusResponse {
    PendingStatusResponse {
        pending: true,
        disc_id: Some(disc_id.parse().expect("disc id")),
        disc_type: Some("bd-video".into()),
        results: titles
            .iter()
            .map(|title| RawCandidate {
                title: Some((*title).to_string()),
                release_date: Some("1999-03-31".into()),
                ..RawCandidate::default()
            })
            .collect(),
        timeout: Some(budget_secs),
        ..PendingStatusResponse::default()
    }
}

#[derive(Debug, Default)]
struct BackendState {
    status: PendingStatusResponse,
    replies: VecDeque<Result<SubmitDecisionResponse, BackendError>>,
    submissions: Vec<SubmitDecisionRequest>,
    clear_on_accept: bool,
    poll_delay: Duration,
    polls: usize,
    in_flight: usize,
    max_in_flight: usize,
}

/// In-memory backend: reports a settable status and answers submissions
/// from a queue of scripted replies, accepting when the queue is empty.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    state: Mutex<BackendState>,
}

impl ScriptedBackend {
    pub fn new(status: PendingStatusResponse) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.status = status;
            state.clear_on_accept = true;
        }
        Arc::new(backend)
    }

    pub fn set_status(&self, status: PendingStatusResponse) {
        self.state.lock().unwrap().status = status;
    }

    /// Keep reporting the disc as pending even after accepting a decision.
    pub fn keep_status_on_accept(&self) {
        self.state.lock().unwrap().clear_on_accept = false;
    }

    pub fn set_poll_delay(&self, delay: Duration) {
        self.state.lock().unwrap().poll_delay = delay;
    }

    pub fn queue_reply(&self, reply: Result<SubmitDecisionResponse, BackendError>) {
        self.state.lock().unwrap().replies.push_back(reply);
    }

    pub fn submissions(&self) -> Vec<SubmitDecisionRequest> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn polls(&self) -> usize {
        self.state.lock().unwrap().polls
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().unwrap().max_in_flight
    }

    pub async fn wait_for_submissions(&self, count: usize) -> Vec<SubmitDecisionRequest> {
        time::timeout(Duration::from_secs(600), async {
            loop {
                let submissions = self.submissions();
                if submissions.len() >= count {
                    return submissions;
                }
                time::sleep(Duration::from_millis(100)).await;
            }
        })
        .await
        .expect("submissions within timeout")
    }
}

#[async_trait]
impl SelectionBackend for ScriptedBackend {
    async fn pending_status(&self) -> Result<PendingStatusResponse, BackendError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.polls += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.poll_delay
        };
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.in_flight -= 1;
        Ok(state.status.clone())
    }

    async fn submit_decision(
        &self,
        request: &SubmitDecisionRequest,
    ) -> Result<SubmitDecisionResponse, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.submissions.push(request.clone());
        let reply = state
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok(SubmitDecisionResponse::accepted()));
        if state.clear_on_accept && matches!(reply, Ok(ref r) if r.success) {
            state.status = PendingStatusResponse::idle();
        }
        reply
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Render {
        disc_id: String,
        candidates: usize,
        highlighted: usize,
    },
    Highlight(usize),
    Countdown(u32, Urgency),
    Error(String),
    Notify(String),
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingPresenter {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn renders(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Render { .. }))
            .count()
    }

    pub fn countdowns(&self) -> Vec<u32> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::Countdown(remaining, _) => Some(*remaining),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, request: &PendingSelectionRequest, highlighted: usize) {
        self.push(Call::Render {
            disc_id: request.disc_id().to_string(),
            candidates: request.len(),
            highlighted,
        });
    }

    fn highlight(&mut self, index: usize) {
        self.push(Call::Highlight(index));
    }

    fn countdown(&mut self, remaining: u32, urgency: Urgency) {
        self.push(Call::Countdown(remaining, urgency));
    }

    fn show_error(&mut self, message: &str) {
        self.push(Call::Error(message.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.push(Call::Notify(message.to_string()));
    }

    fn close(&mut self) {
        self.push(Call::Close);
    }
}

pub async fn wait_until<F>(handle: &CoordinatorHandle, mut predicate: F) -> Snapshot
where
    F: FnMut(&Snapshot) -> bool,
{
    let mut rx = handle.subscribe();
    let snapshot = time::timeout(Duration::from_secs(600), rx.wait_for(|s| predicate(s)))
        .await
        .expect("state reached within timeout")
        .expect("coordinator still running");
    snapshot.clone()
}
