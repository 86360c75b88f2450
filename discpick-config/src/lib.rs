//! Shared configuration library for discpick.
//!
//! Resolves the coordinator's settings from, in increasing precedence,
//! built-in defaults, a `discpick.toml` file, a `.env` file plus process
//! environment, and command-line overrides. Guard rails reject values the
//! coordinator cannot run with and collect warnings for merely odd ones.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    BackendConfig, Config, ConfigMetadata, LoggingConfig, PollConfig,
    SelectionConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
