//! Contract between the bootstrap and a host editor's language-client
//! framework.
//!
//! A host adapter implements [`HostWindow`] and [`HostDialogs`], registers
//! [`LanguageHandler`]s in a [`HandlerRegistry`], and asks each handler
//! whether it may start before launching the configured command.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use lsp_types::ServerCapabilities;
use tracing::{debug, info};

use crate::client::ClientConfiguration;
use crate::errors::{LaunchError, RegistryError};
use crate::probe::{ProjectProbe, ToolProbe, Workspace};
use crate::process::ProcessLauncher;
use crate::readiness::{BootstrapResolver, Readiness};
use crate::setup::{SetupOutcome, SetupStep};

/// Tracing target for host interactions.
const HOST_TARGET: &str = "dotty_lsp_bootstrap::host";

/// The host window a server is started for.
#[cfg_attr(test, mockall::automock)]
pub trait HostWindow {
    /// Project folders in the order the host lists them.
    fn folders(&self) -> Vec<PathBuf>;

    /// Shows a transient message in the window's status area.
    fn status_message(&self, message: &str);
}

/// Modal dialogs offered by the host.
#[cfg_attr(test, mockall::automock)]
pub trait HostDialogs {
    /// Shows an informational dialog.
    fn message_dialog(&self, message: &str);

    /// Asks an OK/Cancel question; `true` means OK.
    fn ok_cancel_dialog(&self, message: &str) -> bool;
}

/// A language server integration registered with the host.
pub trait LanguageHandler {
    /// Unique handler name.
    fn name(&self) -> &str;

    /// Client configuration handed to the host.
    fn config(&self) -> &ClientConfiguration;

    /// Called before each start attempt; `false` tells the host to skip it.
    fn can_start(&self, window: &dyn HostWindow) -> bool;

    /// Called once the server has completed its initialisation handshake.
    fn on_initialized(&self, capabilities: &ServerCapabilities);
}

impl fmt::Debug for dyn LanguageHandler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LanguageHandler")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Handler for the Dotty language server.
#[derive(Debug)]
pub struct DottyHandler<T, P> {
    config: ClientConfiguration,
    resolver: BootstrapResolver<T, P>,
}

impl<T, P> DottyHandler<T, P> {
    /// Builds the handler; the client launches the resolver's launch command.
    #[must_use]
    pub fn new(resolver: BootstrapResolver<T, P>) -> Self {
        let config = ClientConfiguration::dotty(resolver.commands().launch.clone());
        Self { config, resolver }
    }

    /// Resolver backing the handler.
    #[must_use]
    pub const fn resolver(&self) -> &BootstrapResolver<T, P> {
        &self.resolver
    }
}

impl<T, P> DottyHandler<T, P>
where
    T: ToolProbe,
    P: ProjectProbe,
{
    /// Runs the setup command against hosts with blocking dialogs.
    ///
    /// Hosts with asynchronous dialogs call
    /// [`BootstrapResolver::setup_interactive`] and resolve the returned
    /// continuation themselves.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the confirmed fetch cannot be started.
    pub fn run_setup<D, L>(&self, dialogs: &D, launcher: &L) -> Result<SetupOutcome, LaunchError>
    where
        D: HostDialogs + ?Sized,
        L: ProcessLauncher + ?Sized,
    {
        match self.resolver.setup_interactive() {
            SetupStep::Aborted(reason) => {
                dialogs.message_dialog(reason.setup_message());
                Ok(SetupOutcome::Aborted(reason))
            }
            SetupStep::AwaitingConfirmation(pending) => {
                let answer = dialogs.ok_cancel_dialog(pending.prompt()).into();
                pending.resolve(answer, launcher)
            }
        }
    }
}

impl<T, P> LanguageHandler for DottyHandler<T, P>
where
    T: ToolProbe,
    P: ProjectProbe,
{
    fn name(&self) -> &str {
        self.config.name()
    }

    fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    fn can_start(&self, window: &dyn HostWindow) -> bool {
        let workspace = Workspace::new(window.folders());
        match self.resolver.can_start(&workspace) {
            Readiness::Ready => true,
            Readiness::NotReady(reason) => {
                info!(
                    target: HOST_TARGET,
                    handler = self.name(),
                    reason = reason.as_str(),
                    "server start skipped"
                );
                let package = self.resolver.descriptor().package();
                window.status_message(&reason.status_message(package));
                false
            }
        }
    }

    fn on_initialized(&self, capabilities: &ServerCapabilities) {
        debug!(
            target: HOST_TARGET,
            handler = self.name(),
            completion = capabilities.completion_provider.is_some(),
            hover = capabilities.hover_provider.is_some(),
            "server initialised"
        );
    }
}

/// Handlers known to the host, keyed by name.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn LanguageHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the name is taken.
    pub fn register(&mut self, handler: Box<dyn LanguageHandler>) -> Result<(), RegistryError> {
        let name = handler.name().to_owned();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        debug!(target: HOST_TARGET, handler = %name, "registered language handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Looks up a handler by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn LanguageHandler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
