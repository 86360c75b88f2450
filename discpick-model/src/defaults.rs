//! Built-in values shared by the config loader and the coordinator.

use std::time::Duration;

/// Decision window used when the backend does not send one.
pub const DEFAULT_DECISION_BUDGET_SECS: u32 = 60;

/// Remaining seconds at or below which the countdown turns urgent.
pub const DEFAULT_URGENCY_THRESHOLD_SECS: u32 = 10;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
