//! Parsed `group:name:version` artifact coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Structured identifier used by Coursier to locate an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    group: String,
    name: String,
    version: String,
}

impl ArtifactCoordinate {
    /// Organisation part, e.g. `ch.epfl.lamp`.
    #[must_use]
    pub fn group(&self) -> &str {
        self.group.as_str()
    }

    /// Module name, e.g. `dotty-language-server_0.7`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Version string, e.g. `0.7.0-RC1`.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_str()
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Errors raised when parsing an [`ArtifactCoordinate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinateParseError {
    /// The input did not contain exactly three `:`-separated segments.
    #[error("artifact coordinate '{input}' must have the form group:name:version")]
    Shape {
        /// Text that failed to parse.
        input: String,
    },
    /// One of the segments was blank.
    #[error("artifact coordinate '{input}' has an empty {segment}")]
    EmptySegment {
        /// Text that failed to parse.
        input: String,
        /// Which segment was blank.
        segment: &'static str,
    },
}

impl FromStr for ArtifactCoordinate {
    type Err = CoordinateParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let segments: Vec<&str> = trimmed.split(':').collect();
        let [group, name, version] = segments.as_slice() else {
            return Err(CoordinateParseError::Shape {
                input: trimmed.to_owned(),
            });
        };

        for (segment, value) in [("group", group), ("name", name), ("version", version)] {
            if value.trim().is_empty() {
                return Err(CoordinateParseError::EmptySegment {
                    input: trimmed.to_owned(),
                    segment,
                });
            }
        }

        Ok(Self {
            group: (*group).to_owned(),
            name: (*name).to_owned(),
            version: (*version).to_owned(),
        })
    }
}
