use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Gate {
    stopped: bool,
}

/// A one-second countdown running on its own task.
///
/// Callbacks run while holding the countdown's gate, so once [`cancel`]
/// returns neither callback fires again. Dropping the countdown cancels it.
///
/// [`cancel`]: Countdown::cancel
#[derive(Debug)]
pub struct Countdown {
    gate: Arc<Mutex<Gate>>,
    task: Option<JoinHandle<()>>,
}

fn lock(gate: &Mutex<Gate>) -> MutexGuard<'_, Gate> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Countdown {
    /// Counts down from `budget_secs`, calling `on_tick(remaining)` once per
    /// second down to and including zero, then `on_expire` exactly once.
    pub fn start<T, E>(budget_secs: u32, mut on_tick: T, on_expire: E) -> Self
    where
        T: FnMut(u32) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let gate = Arc::new(Mutex::new(Gate::default()));
        let task_gate = Arc::clone(&gate);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut remaining = budget_secs;
            while remaining > 0 {
                ticker.tick().await;
                remaining -= 1;

                let guard = lock(&task_gate);
                if guard.stopped {
                    return;
                }
                on_tick(remaining);
            }

            let mut guard = lock(&task_gate);
            if guard.stopped {
                return;
            }
            guard.stopped = true;
            trace!(budget_secs, "countdown expired");
            on_expire();
        });

        Self {
            gate,
            task: Some(task),
        }
    }

    /// Stops the countdown. Idempotent.
    pub fn cancel(&mut self) {
        lock(&self.gate).stopped = true;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// False once the countdown expired or was cancelled.
    pub fn is_running(&self) -> bool {
        !lock(&self.gate).stopped
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
