use std::time::Duration;

use thiserror::Error;
use url::Url;

use super::models::Config;

const POLL_INTERVAL_SANE_MIN: Duration = Duration::from_secs(1);
const POLL_INTERVAL_SANE_MAX: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("backend URL '{value}' is invalid: {reason}")]
    InvalidBackendUrl { value: String, reason: String },
    #[error("endpoint path for {field} must start with '/': '{value}'")]
    InvalidEndpointPath { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("no disc kinds configured; the coordinator would never surface a request")]
    NoDiscKinds,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_backend_url(&config.backend.base_url)?;
    validate_endpoint_path("backend.pending_path", &config.backend.pending_path)?;
    validate_endpoint_path("backend.submit_path", &config.backend.submit_path)?;

    if config.backend.request_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroValue {
            field: "backend.request_timeout",
        });
    }
    if config.poll.interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroValue {
            field: "poll.interval",
        });
    }
    if config.selection.default_budget_secs == 0 {
        return Err(ConfigGuardRailError::ZeroValue {
            field: "selection.default_budget_secs",
        });
    }
    if config.selection.disc_kinds.is_empty() {
        return Err(ConfigGuardRailError::NoDiscKinds);
    }

    let interval = config.poll.interval;
    if !(POLL_INTERVAL_SANE_MIN..=POLL_INTERVAL_SANE_MAX).contains(&interval) {
        warnings.push_with_hint(
            format!(
                "poll interval {} is outside the usual 1s-10s range",
                humantime::format_duration(interval)
            ),
            "2s-3s keeps the prompt responsive without hammering the backend",
        );
    }

    if config.selection.urgency_threshold_secs
        >= config.selection.default_budget_secs
    {
        warnings.push(format!(
            "urgency threshold ({}s) is not below the default decision budget ({}s); \
             prompts will start out urgent",
            config.selection.urgency_threshold_secs,
            config.selection.default_budget_secs
        ));
    }

    Ok(warnings)
}

fn validate_backend_url(raw: &str) -> Result<(), ConfigGuardRailError> {
    let invalid = |reason: String| ConfigGuardRailError::InvalidBackendUrl {
        value: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}

fn validate_endpoint_path(
    field: &'static str,
    value: &str,
) -> Result<(), ConfigGuardRailError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigGuardRailError::InvalidEndpointPath {
            field,
            value: value.to_string(),
        })
    }
}
