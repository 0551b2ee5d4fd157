use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Package name reported to users in status messages and prompts.
pub const DEFAULT_PACKAGE_NAME: &str = "dotty-language-server";

/// Coordinate of the language server artifact fetched through Coursier.
pub const DEFAULT_ARTIFACT: &str = "ch.epfl.lamp:dotty-language-server_0.7:0.7.0-RC1";

/// Main class launched from the language server artifact.
pub const DEFAULT_ENTRY_POINT: &str = "dotty.tools.languageserver.Main";

/// File written by the build tool once a project is prepared for the IDE.
pub const DEFAULT_MARKER_FILE: &str = ".dotty-ide.json";

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned package name default.
pub fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_owned()
}

/// Owned artifact coordinate default.
pub fn default_artifact() -> String {
    DEFAULT_ARTIFACT.to_owned()
}

/// Owned entry point default.
pub fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_owned()
}

/// Owned marker file name default.
pub fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_owned()
}
