//! Fire-and-forget process launching on behalf of the host.
//!
//! The resolver never waits on the processes it starts: the host's process
//! facility owns their output, completion, and cancellation.
//! [`SpawnLauncher`] is the stand-alone implementation used by the terminal
//! host.

use std::path::PathBuf;
use std::process::Stdio;

use tracing::{debug, warn};

use crate::commands::CommandSpec;
use crate::errors::LaunchError;

/// Tracing target for process launching.
const PROCESS_TARGET: &str = "dotty_lsp_bootstrap::process";

/// Identifies a process handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaunchHandle {
    pid: u32,
}

impl LaunchHandle {
    /// Wraps an operating-system process identifier.
    #[must_use]
    pub const fn new(pid: u32) -> Self {
        Self { pid }
    }

    /// Operating-system process identifier.
    #[must_use]
    pub const fn pid(self) -> u32 {
        self.pid
    }
}

/// Host facility that starts external processes.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher {
    /// Starts `command` and returns without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the process cannot be started.
    fn launch(&self, command: &CommandSpec) -> Result<LaunchHandle, LaunchError>;
}

/// Spawns commands as detached child processes.
///
/// Standard input is closed; standard output and error are inherited so the
/// fetch progress reaches the user's terminal.
#[derive(Debug, Clone, Default)]
pub struct SpawnLauncher {
    working_dir: Option<PathBuf>,
}

impl SpawnLauncher {
    /// Launcher that starts processes in the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts processes in `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl ProcessLauncher for SpawnLauncher {
    fn launch(&self, command: &CommandSpec) -> Result<LaunchHandle, LaunchError> {
        if command.program().trim().is_empty() {
            return Err(LaunchError::EmptyProgram);
        }

        let mut process = command.to_command();
        process
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }

        debug!(
            target: PROCESS_TARGET,
            command = %command,
            "spawning process"
        );

        let child = process.spawn().map_err(|error| {
            warn!(
                target: PROCESS_TARGET,
                program = command.program(),
                %error,
                "process failed to start"
            );
            LaunchError::spawn(command, error)
        })?;

        let handle = LaunchHandle::new(child.id());
        debug!(
            target: PROCESS_TARGET,
            pid = handle.pid(),
            "process started"
        );
        // Dropping the child handle neither waits on nor kills the process.
        drop(child);
        Ok(handle)
    }
}
