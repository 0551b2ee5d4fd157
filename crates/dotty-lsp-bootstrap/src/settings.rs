//! Resolver settings derived once from the layered configuration.

use std::path::{Path, PathBuf};

use dotty_lsp_config::{Config, ConfigValidationError};
use thiserror::Error;

use crate::commands::{ServerCommands, resolve_commands};
use crate::coordinate::{ArtifactCoordinate, CoordinateParseError};
use crate::descriptor::ServerDescriptor;
use crate::platform::Platform;
use crate::probe::{MarkerFileProbe, SearchPathProbe};
use crate::readiness::BootstrapResolver;

/// Errors raised while turning [`Config`] into [`BootstrapSettings`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A configuration value was blank or malformed.
    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
    /// The artifact coordinate could not be parsed.
    #[error(transparent)]
    Artifact(#[from] CoordinateParseError),
}

/// Immutable inputs of the resolver, built once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSettings {
    descriptor: ServerDescriptor,
    launcher_dir: Option<PathBuf>,
    marker_file: String,
    platform: Platform,
}

impl BootstrapSettings {
    /// Validates `config` and derives settings for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for blank values or a malformed artifact.
    pub fn from_config(config: &Config, platform: Platform) -> Result<Self, SettingsError> {
        config.validate()?;
        let artifact: ArtifactCoordinate = config.artifact().parse()?;
        Ok(Self {
            descriptor: ServerDescriptor::new(
                config.package_name(),
                artifact,
                config.entry_point(),
            ),
            launcher_dir: config
                .launcher_dir()
                .map(|dir| dir.as_std_path().to_path_buf()),
            marker_file: config.marker_file().to_owned(),
            platform,
        })
    }

    /// Server being bootstrapped.
    #[must_use]
    pub const fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    /// Directory holding the Coursier launcher, if configured.
    #[must_use]
    pub fn launcher_dir(&self) -> Option<&Path> {
        self.launcher_dir.as_deref()
    }

    /// Marker file name.
    #[must_use]
    pub fn marker_file(&self) -> &str {
        self.marker_file.as_str()
    }

    /// Platform used for executable naming.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Fetch, launch, and run commands for these settings.
    #[must_use]
    pub fn commands(&self) -> ServerCommands {
        resolve_commands(&self.descriptor, self.launcher_dir(), self.platform)
    }

    /// Resolver with caller-supplied probes.
    #[must_use]
    pub fn resolver_with<T, P>(&self, tools: T, project: P) -> BootstrapResolver<T, P> {
        BootstrapResolver::new(self.descriptor.clone(), self.commands(), tools, project)
    }

    /// Resolver probing the process `PATH` and the configured marker file.
    #[must_use]
    pub fn system_resolver(&self) -> BootstrapResolver<SearchPathProbe, MarkerFileProbe> {
        self.resolver_with(
            SearchPathProbe::from_env(self.platform),
            MarkerFileProbe::new(self.marker_file.clone()),
        )
    }
}
