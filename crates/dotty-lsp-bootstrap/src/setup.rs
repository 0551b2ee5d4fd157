//! Interactive provisioning expressed as a confirmation continuation.
//!
//! Hosts usually present dialogs asynchronously, so setup is split in two:
//! [`BootstrapResolver::setup_interactive`](crate::BootstrapResolver::setup_interactive)
//! performs the toolchain checks and hands back a [`PendingFetch`]; the host
//! resolves it with the user's answer whenever that answer arrives.

use tracing::info;

use crate::commands::CommandSpec;
use crate::errors::LaunchError;
use crate::process::{LaunchHandle, ProcessLauncher};
use crate::readiness::ToolchainGap;

/// Tracing target for setup operations.
const SETUP_TARGET: &str = "dotty_lsp_bootstrap::setup";

/// User's answer to the install prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user agreed to fetch the server.
    Accepted,
    /// The user dismissed the prompt.
    Declined,
}

impl From<bool> for Confirmation {
    fn from(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Declined
        }
    }
}

/// First stage of interactive setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStep {
    /// The toolchain is incomplete; show [`ToolchainGap::setup_message`].
    Aborted(ToolchainGap),
    /// Waiting on the user to confirm the fetch.
    AwaitingConfirmation(PendingFetch),
}

/// Final outcome of interactive setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The toolchain was incomplete; nothing was started.
    Aborted(ToolchainGap),
    /// The user declined; nothing was started.
    Declined,
    /// The fetch command was handed to the launcher.
    FetchStarted(LaunchHandle),
}

/// Fetch awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending fetch does nothing until it is resolved"]
pub struct PendingFetch {
    prompt: String,
    command: CommandSpec,
}

impl PendingFetch {
    pub(crate) fn new(package: &str, command: CommandSpec) -> Self {
        Self {
            prompt: format!("{package} was not available\n Install now?"),
            command,
        }
    }

    /// Question to put to the user.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    /// Command that runs once the user confirms.
    #[must_use]
    pub const fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Completes setup with the user's answer.
    ///
    /// A declined prompt has no side effect. An accepted prompt hands the
    /// fetch command to `launcher` and returns without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the launcher cannot start the process.
    pub fn resolve<L>(self, answer: Confirmation, launcher: &L) -> Result<SetupOutcome, LaunchError>
    where
        L: ProcessLauncher + ?Sized,
    {
        match answer {
            Confirmation::Declined => {
                info!(target: SETUP_TARGET, "server fetch declined");
                Ok(SetupOutcome::Declined)
            }
            Confirmation::Accepted => {
                info!(
                    target: SETUP_TARGET,
                    command = %self.command,
                    "starting server fetch"
                );
                launcher
                    .launch(&self.command)
                    .map(SetupOutcome::FetchStarted)
            }
        }
    }
}
