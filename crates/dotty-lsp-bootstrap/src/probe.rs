//! Read-only probes for installed tools and project preparation.
//!
//! Every probe fails closed: an unreadable search path entry, a permission
//! error, or an unset `PATH` all read as "missing" so the readiness gate
//! stays shut instead of surfacing an error to the host.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::platform::{Platform, Tool, executable_name};

/// Tracing target for probe operations.
const PROBE_TARGET: &str = "dotty_lsp_bootstrap::probe";

/// Ordered project folders of a host window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    /// Builds a workspace from folders in the order the host lists them.
    #[must_use]
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    /// All folders in host order.
    #[must_use]
    pub fn folders(&self) -> &[PathBuf] {
        self.folders.as_slice()
    }

    /// The folder consulted for the preparation marker.
    ///
    /// Later folders of a multi-root workspace are never inspected.
    #[must_use]
    pub fn first_folder(&self) -> Option<&Path> {
        self.folders.first().map(PathBuf::as_path)
    }
}

/// Detects whether a tool is available to the host.
#[cfg_attr(test, mockall::automock)]
pub trait ToolProbe {
    /// Returns `true` when `tool` can be executed.
    fn is_installed(&self, tool: Tool) -> bool;
}

/// Detects whether a project folder has been prepared for the server.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectProbe {
    /// Returns `true` when `folder` carries the preparation marker.
    fn has_marker(&self, folder: &Path) -> bool;
}

/// Where [`SearchPathProbe`] reads its directories from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchPathSource {
    /// The process `PATH` and working directory at lookup time.
    Process,
    /// A fixed, already joined list of directories.
    Explicit(OsString),
}

/// Looks tools up on an executable search path.
#[derive(Debug, Clone)]
pub struct SearchPathProbe {
    platform: Platform,
    source: SearchPathSource,
}

impl SearchPathProbe {
    /// Probe over the process environment.
    ///
    /// `PATH` and the working directory are read on every lookup, so changes
    /// the host makes after the probe was built are honoured.
    #[must_use]
    pub const fn from_env(platform: Platform) -> Self {
        Self {
            platform,
            source: SearchPathSource::Process,
        }
    }

    /// Probe over an explicit search path, e.g. a joined list of directories.
    #[must_use]
    pub fn with_search_path(platform: Platform, search_path: impl Into<OsString>) -> Self {
        Self {
            platform,
            source: SearchPathSource::Explicit(search_path.into()),
        }
    }

    /// Full path of `tool` when it is found on the search path.
    #[must_use]
    pub fn locate(&self, tool: Tool) -> Option<PathBuf> {
        let name = executable_name(tool, self.platform);
        let search_path = match &self.source {
            SearchPathSource::Process => env::var_os("PATH"),
            SearchPathSource::Explicit(paths) => Some(paths.clone()),
        };
        let Some(search_path) = search_path else {
            debug!(
                target: PROBE_TARGET,
                tool = %tool,
                "no executable search path configured"
            );
            return None;
        };
        let cwd = match env::current_dir() {
            Ok(cwd) => cwd,
            Err(error) => {
                debug!(
                    target: PROBE_TARGET,
                    tool = %tool,
                    %error,
                    "working directory unavailable; treating tool as missing"
                );
                return None;
            }
        };

        match which::which_in(&name, Some(search_path), cwd) {
            Ok(path) => {
                debug!(
                    target: PROBE_TARGET,
                    tool = %tool,
                    path = %path.display(),
                    "tool found on search path"
                );
                Some(path)
            }
            Err(error) => {
                debug!(
                    target: PROBE_TARGET,
                    tool = %tool,
                    executable = %name,
                    %error,
                    "tool not found on search path"
                );
                None
            }
        }
    }
}

impl ToolProbe for SearchPathProbe {
    fn is_installed(&self, tool: Tool) -> bool {
        self.locate(tool).is_some()
    }
}

/// Checks for a fixed-name marker file directly inside a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFileProbe {
    file_name: String,
}

impl MarkerFileProbe {
    /// Probe for `file_name`, e.g. `.dotty-ide.json`.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl ProjectProbe for MarkerFileProbe {
    fn has_marker(&self, folder: &Path) -> bool {
        let path = folder.join(&self.file_name);
        match path.try_exists() {
            Ok(exists) => {
                debug!(
                    target: PROBE_TARGET,
                    marker = %path.display(),
                    exists,
                    "checked project marker"
                );
                exists
            }
            Err(error) => {
                debug!(
                    target: PROBE_TARGET,
                    marker = %path.display(),
                    %error,
                    "marker probe failed; treating as missing"
                );
                false
            }
        }
    }
}
