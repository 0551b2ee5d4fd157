//! Identity of the language server that the bootstrap fetches and runs.

use dotty_lsp_config::{DEFAULT_ARTIFACT, DEFAULT_ENTRY_POINT, DEFAULT_PACKAGE_NAME};

use crate::coordinate::{ArtifactCoordinate, CoordinateParseError};

/// Which server version to fetch and which class to start.
///
/// Built once at start-up and passed by reference; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDescriptor {
    package: String,
    artifact: ArtifactCoordinate,
    entry_point: String,
}

impl ServerDescriptor {
    /// Builds a descriptor from its parts.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        artifact: ArtifactCoordinate,
        entry_point: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            artifact,
            entry_point: entry_point.into(),
        }
    }

    /// Descriptor for the bundled Dotty language server release.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in coordinate is malformed.
    pub fn dotty() -> Result<Self, CoordinateParseError> {
        Ok(Self::new(
            DEFAULT_PACKAGE_NAME,
            DEFAULT_ARTIFACT.parse()?,
            DEFAULT_ENTRY_POINT,
        ))
    }

    /// Package name used in user-facing messages.
    #[must_use]
    pub fn package(&self) -> &str {
        self.package.as_str()
    }

    /// Coordinate of the server artifact.
    #[must_use]
    pub const fn artifact(&self) -> &ArtifactCoordinate {
        &self.artifact
    }

    /// Fully qualified main class of the server.
    #[must_use]
    pub fn entry_point(&self) -> &str {
        self.entry_point.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn dotty_descriptor_uses_released_server() {
        let descriptor = ServerDescriptor::dotty().expect("built-in coordinate parses");

        assert_eq!(descriptor.package(), "dotty-language-server");
        assert_eq!(descriptor.artifact().version(), "0.7.0-RC1");
        assert_eq!(descriptor.entry_point(), "dotty.tools.languageserver.Main");
    }
}
