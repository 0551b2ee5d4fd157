//! Declarative client configuration handed to the host editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::commands::CommandSpec;

/// Everything a host needs to launch a language server and route messages
/// to it.
///
/// The host owns the value once it has been handed over; the bootstrap never
/// mutates it afterwards. Servers speak over stdio, so `tcp_port` is always
/// `None` for configurations built here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfiguration {
    name: String,
    command: CommandSpec,
    tcp_port: Option<u16>,
    enabled: bool,
    scopes: Vec<String>,
    syntaxes: Vec<String>,
    language_id: String,
    #[serde(default)]
    init_options: Map<String, Value>,
    #[serde(default)]
    settings: Map<String, Value>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

impl ClientConfiguration {
    /// Disabled stdio client with no scopes, syntaxes, or options.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        command: CommandSpec,
        language_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command,
            tcp_port: None,
            enabled: false,
            scopes: Vec::new(),
            syntaxes: Vec::new(),
            language_id: language_id.into(),
            init_options: Map::new(),
            settings: Map::new(),
            env: BTreeMap::new(),
        }
    }

    /// Configuration for the Dotty server launched with `launch`.
    #[must_use]
    pub fn dotty(launch: CommandSpec) -> Self {
        Self::new("dotty", launch, "scala")
            .with_scopes(["source.scala"])
            .with_syntaxes(["Packages/Scala/Scala.sublime-syntax"])
    }

    /// Replaces the source scopes the client applies to.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the syntax definitions the client applies to.
    #[must_use]
    pub fn with_syntaxes<I, S>(mut self, syntaxes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.syntaxes = syntaxes.into_iter().map(Into::into).collect();
        self
    }

    /// Client name as registered with the host.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Command the host runs to start the server.
    #[must_use]
    pub const fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Fixed TCP port; `None` selects stdio transport.
    #[must_use]
    pub const fn tcp_port(&self) -> Option<u16> {
        self.tcp_port
    }

    /// Whether the host starts the client without the user opting in.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Source scopes the client applies to.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        self.scopes.as_slice()
    }

    /// Syntax definitions the client applies to.
    #[must_use]
    pub fn syntaxes(&self) -> &[String] {
        self.syntaxes.as_slice()
    }

    /// Language identifier sent in document notifications.
    #[must_use]
    pub fn language_id(&self) -> &str {
        self.language_id.as_str()
    }

    /// Options sent with the `initialize` request.
    #[must_use]
    pub const fn init_options(&self) -> &Map<String, Value> {
        &self.init_options
    }

    /// Settings pushed to the server after initialisation.
    #[must_use]
    pub const fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Environment overrides for the server process.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}
