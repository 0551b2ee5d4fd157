//! Shared configuration for the Dotty language-server bootstrap.
//!
//! [`Config`] is loaded through `ortho_config`, which layers values in the
//! following order (later layers win): built-in defaults, the configuration
//! file named by `--config-path` or `DOTTY_LSP_CONFIG_PATH`, environment
//! variables prefixed with `DOTTY_LSP_`, and finally command-line flags.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_ARTIFACT, DEFAULT_ENTRY_POINT, DEFAULT_LOG_FILTER, DEFAULT_MARKER_FILE,
    DEFAULT_PACKAGE_NAME, default_artifact, default_entry_point, default_log_filter_string,
    default_log_format, default_marker_file, default_package_name,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Layered configuration consumed by the resolver and the terminal host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "DOTTY_LSP")]
pub struct Config {
    /// Tracing filter expression, e.g. `info` or `dotty_lsp_bootstrap=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Package name shown in status messages and prompts.
    #[ortho_config(default = default_package_name())]
    pub package_name: String,
    /// `group:name:version` coordinate of the language server artifact.
    #[ortho_config(default = default_artifact())]
    pub artifact: String,
    /// Main class started from the artifact.
    #[ortho_config(default = default_entry_point())]
    pub entry_point: String,
    /// Directory holding the Coursier launcher. When unset the launcher is
    /// resolved through the executable search path.
    pub launcher_dir: Option<Utf8PathBuf>,
    /// File name whose presence marks a prepared project.
    #[ortho_config(default = default_marker_file())]
    pub marker_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            package_name: default_package_name(),
            artifact: default_artifact(),
            entry_point: default_entry_point(),
            launcher_dir: None,
            marker_file: default_marker_file(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Package name shown to users.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.package_name.as_str()
    }

    /// Artifact coordinate as configured, not yet parsed.
    #[must_use]
    pub fn artifact(&self) -> &str {
        self.artifact.as_str()
    }

    /// Main class started from the artifact.
    #[must_use]
    pub fn entry_point(&self) -> &str {
        self.entry_point.as_str()
    }

    /// Optional directory holding the Coursier launcher.
    #[must_use]
    pub fn launcher_dir(&self) -> Option<&Utf8Path> {
        self.launcher_dir.as_deref()
    }

    /// Marker file name looked up in the first workspace folder.
    #[must_use]
    pub fn marker_file(&self) -> &str {
        self.marker_file.as_str()
    }

    /// Rejects values that would produce unusable command lines.
    ///
    /// The artifact coordinate is validated separately when the resolver
    /// builds its server descriptor.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("package_name", self.package_name.as_str()),
            ("artifact", self.artifact.as_str()),
            ("entry_point", self.entry_point.as_str()),
            ("marker_file", self.marker_file.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::Empty { field });
            }
        }

        if self.marker_file.contains(['/', '\\']) {
            return Err(ConfigValidationError::MarkerNotFileName {
                value: self.marker_file.clone(),
            });
        }
        Ok(())
    }
}

/// Errors raised by [`Config::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required setting was blank.
    #[error("configuration value '{field}' must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The marker file setting contained a path separator.
    #[error("marker file '{value}' must be a bare file name")]
    MarkerNotFileName {
        /// Configured value.
        value: String,
    },
}
