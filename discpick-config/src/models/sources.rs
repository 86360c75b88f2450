use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: FileBackendConfig,
    #[serde(default)]
    pub poll: FilePollConfig,
    #[serde(default)]
    pub selection: FileSelectionConfig,
    #[serde(default)]
    pub logging: FileLoggingConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileBackendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_path: Option<String>,
    /// Human-readable duration, e.g. `"10s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilePollConfig {
    /// Human-readable duration, e.g. `"3s"` or `"2500ms"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileSelectionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_budget_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_threshold_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_kinds: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Environment-derived configuration values.
///
/// Numeric and duration variables are kept as raw strings so the loader can
/// report which variable was malformed instead of silently ignoring it.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub pending_path: Option<String>,
    pub submit_path: Option<String>,
    pub request_timeout: Option<String>,
    pub poll_interval: Option<String>,
    pub default_budget_secs: Option<String>,
    pub urgency_threshold_secs: Option<String>,
    pub disc_kinds: Option<Vec<String>>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        let mut env_config = Self::default();

        env_config.config_path =
            non_empty_var("DISCPICK_CONFIG").map(PathBuf::from);
        env_config.backend_url = non_empty_var("DISCPICK_BACKEND_URL");
        env_config.pending_path = non_empty_var("DISCPICK_PENDING_PATH");
        env_config.submit_path = non_empty_var("DISCPICK_SUBMIT_PATH");
        env_config.request_timeout = non_empty_var("DISCPICK_REQUEST_TIMEOUT");
        env_config.poll_interval = non_empty_var("DISCPICK_POLL_INTERVAL");
        env_config.default_budget_secs =
            non_empty_var("DISCPICK_DEFAULT_BUDGET_SECS");
        env_config.urgency_threshold_secs =
            non_empty_var("DISCPICK_URGENCY_THRESHOLD_SECS");
        env_config.disc_kinds = parse_csv_var("DISCPICK_DISC_KINDS");
        env_config.log_filter = non_empty_var("DISCPICK_LOG");

        env_config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_csv_var(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|raw| {
        raw.split(',')
            .filter_map(|part| {
                let trimmed = part.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    })
}
