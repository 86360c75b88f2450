use discpick_config::Config;
use discpick_core::{CoordinatorSettings, HttpBackendConfig};

pub fn backend_config(config: &Config) -> HttpBackendConfig {
    HttpBackendConfig {
        base_url: config.backend.base_url.clone(),
        pending_path: config.backend.pending_path.clone(),
        submit_path: config.backend.submit_path.clone(),
        request_timeout: config.backend.request_timeout,
    }
}

pub fn coordinator_settings(config: &Config) -> CoordinatorSettings {
    CoordinatorSettings {
        poll_interval: config.poll.interval,
        default_budget_secs: config.selection.default_budget_secs,
        urgency_threshold_secs: config.selection.urgency_threshold_secs,
        disc_kinds: config.selection.disc_kinds.clone(),
    }
}
