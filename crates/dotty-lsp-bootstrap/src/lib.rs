//! Toolchain detection and command resolution for the Dotty language server.
//!
//! The crate decides whether the Dotty language server can be started for a
//! workspace and how to fetch or launch it. It probes the executable search
//! path for a Java runtime and the `sbt` build tool, checks the first
//! workspace folder for the `.dotty-ide.json` marker written by `sbt`, and
//! builds the Coursier command lines that fetch or run the server.
//!
//! Host editors integrate through the [`LanguageHandler`] trait and the small
//! [`HostWindow`], [`HostDialogs`], and [`ProcessLauncher`] contracts. The
//! resolver itself holds no mutable state: every check is a fresh, read-only
//! probe, and the only side effect (spawning the fetch command) is delegated
//! to the injected launcher.

mod client;
mod commands;
mod coordinate;
mod descriptor;
mod errors;
mod host;
mod platform;
mod probe;
mod process;
mod readiness;
mod settings;
mod setup;

#[cfg(test)]
mod tests;

pub use client::ClientConfiguration;
pub use commands::{CommandSpec, EmptyCommandError, ServerCommands, resolve_commands};
pub use coordinate::{ArtifactCoordinate, CoordinateParseError};
pub use descriptor::ServerDescriptor;
pub use errors::{LaunchError, RegistryError};
pub use host::{DottyHandler, HandlerRegistry, HostDialogs, HostWindow, LanguageHandler};
pub use platform::{Platform, Tool, executable_name};
pub use probe::{MarkerFileProbe, ProjectProbe, SearchPathProbe, ToolProbe, Workspace};
pub use process::{LaunchHandle, ProcessLauncher, SpawnLauncher};
pub use readiness::{BootstrapResolver, Readiness, ToolchainGap, UnreadyReason};
pub use settings::{BootstrapSettings, SettingsError};
pub use setup::{Confirmation, PendingFetch, SetupOutcome, SetupStep};
