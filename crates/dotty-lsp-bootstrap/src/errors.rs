//! Error types surfaced by the bootstrap.
//!
//! Unready toolchain states are not errors; see
//! [`UnreadyReason`](crate::UnreadyReason). The enums here cover real
//! failures. I/O errors are wrapped in `Arc` to keep the types cloneable.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::commands::CommandSpec;

/// Errors raised while handing a command to the process launcher.
#[derive(Debug, Error, Clone)]
pub enum LaunchError {
    /// The command's program name was blank.
    #[error("refusing to launch a command with an empty program name")]
    EmptyProgram,

    /// The operating system refused to start the process.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl LaunchError {
    /// Wraps a spawn failure for `command`.
    pub(crate) fn spawn(command: &CommandSpec, source: io::Error) -> Self {
        Self::Spawn {
            program: command.program().to_owned(),
            source: Arc::new(source),
        }
    }
}

/// Errors returned by [`HandlerRegistry`](crate::HandlerRegistry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A handler with the same name is already registered.
    #[error("language handler '{name}' is already registered")]
    Duplicate {
        /// Name of the rejected handler.
        name: String,
    },
}
