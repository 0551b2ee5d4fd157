//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use dotty_lsp_bootstrap::{LaunchError, SettingsError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid configuration: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(io::Error),
    #[error("failed to serialise output: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(io::Error),
    #[error("{0}")]
    Launch(#[from] LaunchError),
    #[error("failed to run '{program}': {source}")]
    Run { program: String, source: io::Error },
}
