//! Async runtime around [`SelectionMachine`].
//!
//! One task owns the machine and the presenter. Poll probes, countdown
//! callbacks and submissions report back through a channel, so every
//! transition is applied by that single task in arrival order.

use std::sync::Arc;
use std::time::Duration;

use discpick_model::{
    DEFAULT_DECISION_BUDGET_SECS, DEFAULT_POLL_INTERVAL,
    DEFAULT_URGENCY_THRESHOLD_SECS, DiscKind, PendingStatusResponse,
    SubmitDecisionRequest, SubmitDecisionResponse,
};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::backend::{BackendError, SelectionBackend};
use crate::countdown::Countdown;
use crate::machine::{Effect, FlowId, Input, SelectionMachine, Snapshot};
use crate::poll::PollMonitor;
use crate::presenter::Presenter;

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub poll_interval: Duration,
    pub default_budget_secs: u32,
    pub urgency_threshold_secs: u32,
    pub disc_kinds: Vec<DiscKind>,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_budget_secs: DEFAULT_DECISION_BUDGET_SECS,
            urgency_threshold_secs: DEFAULT_URGENCY_THRESHOLD_SECS,
            disc_kinds: DiscKind::video_kinds(),
        }
    }
}

/// User actions fed into the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Highlight(usize),
    Confirm,
    Skip,
    Retry,
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        match command {
            Command::Highlight(index) => Input::Highlight(index),
            Command::Confirm => Input::Confirm,
            Command::Skip => Input::Skip,
            Command::Retry => Input::Retry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinator has stopped")]
pub struct CoordinatorClosed;

/// Cloneable handle for feeding user actions and observing state.
///
/// The coordinator stops once [`shutdown`](Self::shutdown) is called or the
/// last handle is dropped.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::UnboundedSender<Command>,
    stop: Arc<watch::Sender<bool>>,
    snapshot: watch::Receiver<Snapshot>,
}

impl CoordinatorHandle {
    pub fn highlight(&self, index: usize) -> Result<(), CoordinatorClosed> {
        self.send(Command::Highlight(index))
    }

    pub fn confirm(&self) -> Result<(), CoordinatorClosed> {
        self.send(Command::Confirm)
    }

    pub fn skip(&self) -> Result<(), CoordinatorClosed> {
        self.send(Command::Skip)
    }

    pub fn retry(&self) -> Result<(), CoordinatorClosed> {
        self.send(Command::Retry)
    }

    pub fn send(&self, command: Command) -> Result<(), CoordinatorClosed> {
        self.commands.send(command).map_err(|_| CoordinatorClosed)
    }

    pub fn shutdown(&self) {
        let _ = self.stop.send(true);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.clone()
    }
}

#[derive(Debug)]
enum Event {
    Polled(Result<PendingStatusResponse, BackendError>),
    Tick { flow: FlowId, remaining: u32 },
    Expired { flow: FlowId },
    Submitted {
        flow: FlowId,
        result: Result<SubmitDecisionResponse, BackendError>,
    },
}

impl Event {
    fn into_input(self) -> Input {
        match self {
            Event::Polled(result) => Input::Polled(result),
            Event::Tick { flow, remaining } => Input::CountdownTick { flow, remaining },
            Event::Expired { flow } => Input::CountdownExpired { flow },
            Event::Submitted { flow, result } => Input::Submitted { flow, result },
        }
    }
}

pub struct Coordinator<B, P> {
    backend: Arc<B>,
    presenter: P,
    machine: SelectionMachine,
    poll_interval: Duration,
    countdown: Option<(FlowId, Countdown)>,
    probe_in_flight: bool,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: Option<mpsc::UnboundedReceiver<Event>>,
}

impl<B: std::fmt::Debug, P> std::fmt::Debug for Coordinator<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("backend", &self.backend)
            .field("machine", &self.machine)
            .field("poll_interval", &self.poll_interval)
            .field("probe_in_flight", &self.probe_in_flight)
            .finish_non_exhaustive()
    }
}

impl<B, P> Coordinator<B, P>
where
    B: SelectionBackend + 'static,
    P: Presenter + 'static,
{
    pub fn new(backend: Arc<B>, presenter: P, settings: CoordinatorSettings) -> Self {
        let monitor = PollMonitor::new(settings.disc_kinds, settings.default_budget_secs);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            presenter,
            machine: SelectionMachine::new(monitor, settings.urgency_threshold_secs),
            poll_interval: settings.poll_interval,
            countdown: None,
            probe_in_flight: false,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Runs the coordinator on its own task.
    pub fn spawn(self) -> (CoordinatorHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::idle());

        let task = tokio::spawn(self.run(commands_rx, stop_rx, snapshot_tx));
        let handle = CoordinatorHandle {
            commands: commands_tx,
            stop: Arc::new(stop_tx),
            snapshot: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut stop_rx: watch::Receiver<bool>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) {
        let Some(mut events) = self.events_rx.take() else {
            return;
        };
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            poll_interval = ?self.poll_interval,
            "selection coordinator started"
        );

        loop {
            let input = tokio::select! {
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {
                    self.probe();
                    continue;
                }
                Some(command) = commands.recv() => Input::from(command),
                Some(event) = events.recv() => {
                    if matches!(event, Event::Polled(_)) {
                        self.probe_in_flight = false;
                    }
                    event.into_input()
                }
            };

            let effects = self.machine.apply(input);
            self.execute(effects);
            snapshot_tx.send_replace(self.machine.snapshot());
        }

        let effects = self.machine.apply(Input::Shutdown);
        self.execute(effects);
        self.countdown = None;
        snapshot_tx.send_replace(self.machine.snapshot());
        info!("selection coordinator stopped");
    }

    fn probe(&mut self) {
        if self.probe_in_flight {
            debug!("previous pending-status probe still in flight");
            return;
        }
        self.probe_in_flight = true;

        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = backend.pending_status().await;
            let _ = events.send(Event::Polled(result));
        });
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Present {
                    request,
                    highlighted,
                } => self.presenter.render(&request, highlighted),
                Effect::Highlight(index) => self.presenter.highlight(index),
                Effect::Countdown { remaining, urgency } => {
                    self.presenter.countdown(remaining, urgency)
                }
                Effect::StartCountdown { flow, budget_secs } => {
                    self.start_countdown(flow, budget_secs)
                }
                Effect::CancelCountdown { flow } => self.cancel_countdown(flow),
                Effect::Submit { flow, request } => self.submit(flow, request),
                Effect::ShowError(message) => self.presenter.show_error(&message),
                Effect::Notify(message) => self.presenter.notify(&message),
                Effect::Close => self.presenter.close(),
            }
        }
    }

    fn start_countdown(&mut self, flow: FlowId, budget_secs: u32) {
        let ticks = self.events_tx.clone();
        let expiry = self.events_tx.clone();
        let countdown = Countdown::start(
            budget_secs,
            move |remaining| {
                let _ = ticks.send(Event::Tick { flow, remaining });
            },
            move || {
                let _ = expiry.send(Event::Expired { flow });
            },
        );
        // Replacing drops, and so cancels, any previous countdown.
        self.countdown = Some((flow, countdown));
    }

    fn cancel_countdown(&mut self, flow: FlowId) {
        if let Some((owner, mut countdown)) = self.countdown.take() {
            if owner == flow {
                countdown.cancel();
            } else {
                self.countdown = Some((owner, countdown));
            }
        }
    }

    fn submit(&self, flow: FlowId, request: SubmitDecisionRequest) {
        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = backend.submit_decision(&request).await;
            let _ = events.send(Event::Submitted { flow, result });
        });
    }
}
