//! Host platform detection and executable naming.

use std::fmt;

/// Operating system family that decides executable naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows family; launchers carry `.exe` or `.bat` suffixes.
    Windows,
    /// Everything else; executables use bare names.
    Unix,
}

impl Platform {
    /// Platform the current binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Returns the lower-case identifier used in log records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// External tools the bootstrap depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// The Java runtime (`java`).
    JavaRuntime,
    /// The `sbt` build tool, which writes the project marker file.
    BuildTool,
    /// The Coursier launcher used to fetch and start the server.
    Coursier,
}

impl Tool {
    /// Executable name without any platform suffix.
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::JavaRuntime => "java",
            Self::BuildTool => "sbt",
            Self::Coursier => "coursier",
        }
    }

    const fn windows_suffix(self) -> &'static str {
        match self {
            Self::JavaRuntime => ".exe",
            Self::BuildTool | Self::Coursier => ".bat",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.base_name())
    }
}

/// Returns the executable name for `tool` on `platform`.
///
/// ```
/// use dotty_lsp_bootstrap::{Platform, Tool, executable_name};
///
/// assert_eq!(executable_name(Tool::Coursier, Platform::Windows), "coursier.bat");
/// assert_eq!(executable_name(Tool::Coursier, Platform::Unix), "coursier");
/// ```
#[must_use]
pub fn executable_name(tool: Tool, platform: Platform) -> String {
    match platform {
        Platform::Windows => format!("{}{}", tool.base_name(), tool.windows_suffix()),
        Platform::Unix => tool.base_name().to_owned(),
    }
}
