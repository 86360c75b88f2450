pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use discpick_model::{DiscKind, normalize_base_url};
use tracing::debug;

use self::error::ConfigLoadError;
use super::{
    models::{
        BackendConfig, Config, ConfigMetadata, LoggingConfig, PollConfig,
        SelectionConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("discpick.toml"),
        PathBuf::from("config/discpick.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Command-line override; wins over environment and file.
    pub backend_url: Option<String>,
    /// Command-line override; wins over environment and file.
    pub poll_interval: Option<Duration>,
}

/// Result of a successful load: the resolved config plus non-fatal findings.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env_config = EnvConfig::gather();
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let mut load = self.compose_config(file_config, env_config)?;
        load.config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };
        Ok(load)
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = if let Some(explicit) = &self.options.config_path
        {
            (Some(explicit.clone()), true)
        } else if let Some(from_env) = &env_config.config_path {
            (Some(from_env.clone()), true)
        } else {
            (
                DEFAULT_CONFIG_LOCATIONS
                    .iter()
                    .find(|candidate| candidate.exists())
                    .cloned(),
                false,
            )
        };

        let Some(path) = path else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), "loaded config file");
        Ok((Some(file_config), Some(path)))
    }

    /// Layers command-line overrides, environment, file and defaults, in that
    /// order of precedence, then applies guard rails.
    pub fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        let FileConfig {
            backend: file_backend,
            poll: file_poll,
            selection: file_selection,
            logging: file_logging,
        } = file_config.unwrap_or_default();

        let defaults = Config::default();

        let raw_url = self
            .options
            .backend_url
            .clone()
            .or(env.backend_url)
            .or(file_backend.base_url)
            .unwrap_or(defaults.backend.base_url);
        let base_url = normalize_base_url(&raw_url);
        if base_url != raw_url.trim() {
            warnings.push(format!(
                "normalized backend URL from '{raw_url}' to '{base_url}'"
            ));
        }

        let request_timeout = match env
            .request_timeout
            .map(|raw| ("DISCPICK_REQUEST_TIMEOUT", raw))
            .or(file_backend
                .request_timeout
                .map(|raw| ("backend.request_timeout", raw)))
        {
            Some((field, raw)) => parse_duration(field, raw)?,
            None => defaults.backend.request_timeout,
        };

        let backend = BackendConfig {
            base_url,
            pending_path: env
                .pending_path
                .or(file_backend.pending_path)
                .unwrap_or(defaults.backend.pending_path),
            submit_path: env
                .submit_path
                .or(file_backend.submit_path)
                .unwrap_or(defaults.backend.submit_path),
            request_timeout,
        };

        let interval = match self.options.poll_interval {
            Some(interval) => interval,
            None => match env
                .poll_interval
                .map(|raw| ("DISCPICK_POLL_INTERVAL", raw))
                .or(file_poll.interval.map(|raw| ("poll.interval", raw)))
            {
                Some((field, raw)) => parse_duration(field, raw)?,
                None => defaults.poll.interval,
            },
        };

        let default_budget_secs = match env.default_budget_secs {
            Some(raw) => parse_number("DISCPICK_DEFAULT_BUDGET_SECS", raw)?,
            None => file_selection
                .default_budget_secs
                .unwrap_or(defaults.selection.default_budget_secs),
        };
        let urgency_threshold_secs = match env.urgency_threshold_secs {
            Some(raw) => parse_number("DISCPICK_URGENCY_THRESHOLD_SECS", raw)?,
            None => file_selection
                .urgency_threshold_secs
                .unwrap_or(defaults.selection.urgency_threshold_secs),
        };
        let disc_kinds = env
            .disc_kinds
            .or(file_selection.disc_kinds)
            .map(|kinds| kinds.into_iter().map(DiscKind::from).collect())
            .unwrap_or(defaults.selection.disc_kinds);

        let config = Config {
            backend,
            poll: PollConfig { interval },
            selection: SelectionConfig {
                default_budget_secs,
                urgency_threshold_secs,
                disc_kinds,
            },
            logging: LoggingConfig {
                filter: env
                    .log_filter
                    .or(file_logging.filter)
                    .unwrap_or(defaults.logging.filter),
            },
            metadata: ConfigMetadata::default(),
        };

        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok(ConfigLoad { config, warnings })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn parse_duration(
    field: &'static str,
    raw: String,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(&raw).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value: raw,
            source,
        }
    })
}

fn parse_number(
    field: &'static str,
    raw: String,
) -> Result<u32, ConfigLoadError> {
    raw.parse().map_err(|source| ConfigLoadError::InvalidNumber {
        field,
        value: raw,
        source,
    })
}
