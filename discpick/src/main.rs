//! # discpick
//!
//! Watches a disc-ripping backend for discs whose metadata lookup matched
//! several titles and lets an operator pick the right one from a terminal
//! before the decision window runs out.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use discpick::{TerminalPresenter, backend_config, coordinator_settings, forward_commands};
use discpick_config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use discpick_core::{Coordinator, HttpBackend};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "discpick", version)]
#[command(about = "Resolve ambiguous disc metadata matches before the ripper auto-skips")]
struct Cli {
    /// Path to discpick.toml
    #[arg(long, env = "DISCPICK_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(long)]
    backend_url: Option<String>,

    /// Poll interval such as `3s` or `2500ms` (overrides config and environment)
    #[arg(long, value_parser = humantime::parse_duration)]
    poll_interval: Option<Duration>,

    /// Do not read commands from stdin; every request is skipped once its
    /// decision window runs out
    #[arg(long)]
    unattended: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let ConfigLoad { config, warnings } =
        ConfigLoader::with_options(ConfigLoaderOptions {
            config_path: cli.config.clone(),
            env_file: cli.env_file.clone(),
            backend_url: cli.backend_url.clone(),
            poll_interval: cli.poll_interval,
        })
        .load()
        .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "using config file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let backend = HttpBackend::new(backend_config(&config))
        .context("failed to create backend client")?;
    info!(
        backend = %backend.base_url(),
        disc_kinds = ?config.selection.disc_kinds,
        "watching for pending selections"
    );

    let presenter = TerminalPresenter::new(std::io::stdout());
    let (handle, task) =
        Coordinator::new(Arc::new(backend), presenter, coordinator_settings(&config))
            .spawn();

    if cli.unattended {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for ctrl-c")?;
        info!("interrupt received, shutting down");
    } else {
        let stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                info!("interrupt received, shutting down");
            }
            forwarded = forward_commands(stdin, handle.clone()) => {
                forwarded.context("failed to read commands from stdin")?;
                info!("input closed, shutting down");
            }
        }
    }

    handle.shutdown();
    task.await.context("coordinator task failed")?;
    Ok(())
}
