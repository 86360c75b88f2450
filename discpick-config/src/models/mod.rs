pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use discpick_model::{
    DEFAULT_DECISION_BUDGET_SECS, DEFAULT_POLL_INTERVAL,
    DEFAULT_URGENCY_THRESHOLD_SECS, DiscKind,
};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PENDING_PATH: &str = "/api/metadata/pending";
pub const DEFAULT_SUBMIT_PATH: &str = "/api/metadata/select";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub backend: BackendConfig,
    pub poll: PollConfig,
    pub selection: SelectionConfig,
    pub logging: LoggingConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub pending_path: String,
    pub submit_path: String,
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            pending_path: DEFAULT_PENDING_PATH.to_string(),
            submit_path: DEFAULT_SUBMIT_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Window used when the backend omits `timeout`.
    pub default_budget_secs: u32,
    /// Remaining seconds at or below which the countdown is shown as urgent.
    pub urgency_threshold_secs: u32,
    pub disc_kinds: Vec<DiscKind>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_budget_secs: DEFAULT_DECISION_BUDGET_SECS,
            urgency_threshold_secs: DEFAULT_URGENCY_THRESHOLD_SECS,
            disc_kinds: DiscKind::video_kinds(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the resolved values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
