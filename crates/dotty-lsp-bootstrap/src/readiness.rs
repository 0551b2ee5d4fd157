//! The readiness gate evaluated before each server launch.

use std::fmt;

use tracing::debug;

use crate::commands::ServerCommands;
use crate::descriptor::ServerDescriptor;
use crate::platform::Tool;
use crate::probe::{ProjectProbe, ToolProbe, Workspace};
use crate::setup::{PendingFetch, SetupStep};

/// Tracing target for readiness checks.
const READINESS_TARGET: &str = "dotty_lsp_bootstrap::readiness";

/// Why the server cannot start yet.
///
/// These are expected user-facing states, not errors: the host shows the
/// message once and skips the launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnreadyReason {
    /// No Java runtime on the search path.
    RuntimeMissing,
    /// No `sbt` on the search path.
    BuildToolMissing,
    /// The first workspace folder lacks the preparation marker.
    ProjectNotPrepared,
}

impl UnreadyReason {
    /// Status-bar message shown when the host asks whether it may start.
    #[must_use]
    pub fn status_message(self, package: &str) -> String {
        match self {
            Self::RuntimeMissing => format!("The JDK must be installed to run {package}"),
            Self::BuildToolMissing => format!("SBT must be installed to run {package}"),
            Self::ProjectNotPrepared => {
                format!("A dotty project file must be generated before starting {package}")
            }
        }
    }

    /// Stable identifier used in structured output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RuntimeMissing => "runtime_missing",
            Self::BuildToolMissing => "build_tool_missing",
            Self::ProjectNotPrepared => "project_not_prepared",
        }
    }
}

impl fmt::Display for UnreadyReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A missing tool that stops both the readiness gate and interactive setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolchainGap {
    /// No Java runtime on the search path.
    RuntimeMissing,
    /// No `sbt` on the search path.
    BuildToolMissing,
}

impl ToolchainGap {
    /// Dialog message shown when interactive setup cannot proceed.
    #[must_use]
    pub const fn setup_message(self) -> &'static str {
        match self {
            Self::RuntimeMissing => "Please install the JDK before running setup",
            Self::BuildToolMissing => "Please install SBT before running setup",
        }
    }

    /// Stable identifier used in structured output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        UnreadyReason::from_gap(self).as_str()
    }
}

impl fmt::Display for ToolchainGap {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl UnreadyReason {
    const fn from_gap(gap: ToolchainGap) -> Self {
        match gap {
            ToolchainGap::RuntimeMissing => Self::RuntimeMissing,
            ToolchainGap::BuildToolMissing => Self::BuildToolMissing,
        }
    }
}

impl From<ToolchainGap> for UnreadyReason {
    fn from(gap: ToolchainGap) -> Self {
        Self::from_gap(gap)
    }
}

/// Outcome of [`BootstrapResolver::can_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// All checks passed.
    Ready,
    /// The first failing check.
    NotReady(UnreadyReason),
}

impl Readiness {
    /// Whether the host may start the server.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The failing check, if any.
    #[must_use]
    pub const fn reason(self) -> Option<UnreadyReason> {
        match self {
            Self::Ready => None,
            Self::NotReady(reason) => Some(reason),
        }
    }
}

/// Combines the probes, the server descriptor, and its resolved commands.
///
/// The resolver keeps no state between calls; repeated checks against an
/// unchanged environment give the same answer.
#[derive(Debug)]
pub struct BootstrapResolver<T, P> {
    descriptor: ServerDescriptor,
    commands: ServerCommands,
    tools: T,
    project: P,
}

impl<T, P> BootstrapResolver<T, P> {
    /// Builds a resolver from its collaborators.
    #[must_use]
    pub const fn new(
        descriptor: ServerDescriptor,
        commands: ServerCommands,
        tools: T,
        project: P,
    ) -> Self {
        Self {
            descriptor,
            commands,
            tools,
            project,
        }
    }

    /// Server being bootstrapped.
    #[must_use]
    pub const fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    /// Fetch, launch, and run commands for the server.
    #[must_use]
    pub const fn commands(&self) -> &ServerCommands {
        &self.commands
    }
}

impl<T, P> BootstrapResolver<T, P>
where
    T: ToolProbe,
    P: ProjectProbe,
{
    /// Whether `tool` is available to the host.
    #[must_use]
    pub fn is_tool_installed(&self, tool: Tool) -> bool {
        self.tools.is_installed(tool)
    }

    /// Whether the first workspace folder carries the preparation marker.
    ///
    /// An empty workspace answers `false` without touching the filesystem.
    #[must_use]
    pub fn has_project_preparation_marker(&self, workspace: &Workspace) -> bool {
        workspace
            .first_folder()
            .is_some_and(|folder| self.project.has_marker(folder))
    }

    /// Runs the readiness gate; the first failing check wins.
    #[must_use]
    pub fn can_start(&self, workspace: &Workspace) -> Readiness {
        let readiness = match self.toolchain_gap() {
            Some(gap) => Readiness::NotReady(gap.into()),
            None if !self.has_project_preparation_marker(workspace) => {
                Readiness::NotReady(UnreadyReason::ProjectNotPrepared)
            }
            None => Readiness::Ready,
        };

        debug!(
            target: READINESS_TARGET,
            package = self.descriptor.package(),
            ready = readiness.is_ready(),
            reason = readiness.reason().map(UnreadyReason::as_str),
            "evaluated readiness gate"
        );
        readiness
    }

    /// First stage of interactive setup.
    ///
    /// Returns [`SetupStep::Aborted`] when the toolchain is incomplete, or a
    /// [`PendingFetch`] continuation the caller resolves once the user has
    /// answered the confirmation prompt.
    #[must_use]
    pub fn setup_interactive(&self) -> SetupStep {
        if let Some(gap) = self.toolchain_gap() {
            debug!(
                target: READINESS_TARGET,
                reason = gap.as_str(),
                "setup aborted before confirmation"
            );
            return SetupStep::Aborted(gap);
        }

        SetupStep::AwaitingConfirmation(PendingFetch::new(
            self.descriptor.package(),
            self.commands.fetch.clone(),
        ))
    }

    fn toolchain_gap(&self) -> Option<ToolchainGap> {
        if !self.tools.is_installed(Tool::JavaRuntime) {
            return Some(ToolchainGap::RuntimeMissing);
        }
        if !self.tools.is_installed(Tool::BuildTool) {
            return Some(ToolchainGap::BuildToolMissing);
        }
        None
    }
}
