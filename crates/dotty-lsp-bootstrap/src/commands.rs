//! Command lines that fetch, launch, or directly run the language server.

use std::fmt;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::descriptor::ServerDescriptor;
use crate::platform::{Platform, Tool, executable_name};

/// Flag passed to the server to select standard I/O transport.
const STDIO_FLAG: &str = "-stdio";

/// An executable invocation: program followed by its arguments.
///
/// Serialises as a flat JSON array of strings, the shape host editors expect
/// for a client's launch command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

/// Raised when building a [`CommandSpec`] from an empty argument list.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("a command needs at least a program name")]
pub struct EmptyCommandError;

impl CommandSpec {
    /// Builds a command from a program and its arguments.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// The full argument vector, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Builds a [`std::process::Command`] for this invocation.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl From<CommandSpec> for Vec<String> {
    fn from(spec: CommandSpec) -> Self {
        let mut argv = spec.args;
        argv.insert(0, spec.program);
        argv
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = EmptyCommandError;

    fn try_from(mut argv: Vec<String>) -> Result<Self, Self::Error> {
        if argv.is_empty() {
            return Err(EmptyCommandError);
        }
        let program = argv.remove(0);
        Ok(Self {
            program,
            args: argv,
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_word(formatter, &self.program)?;
        for arg in &self.args {
            formatter.write_str(" ")?;
            write_word(formatter, arg)?;
        }
        Ok(())
    }
}

fn write_word(formatter: &mut fmt::Formatter<'_>, word: &str) -> fmt::Result {
    if word.is_empty() || word.contains(char::is_whitespace) {
        write!(formatter, "\"{word}\"")
    } else {
        formatter.write_str(word)
    }
}

/// The three invocations derived from a [`ServerDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerCommands {
    /// Downloads the artifact through Coursier without starting it.
    pub fetch: CommandSpec,
    /// Downloads if needed and starts the server over stdio through Coursier.
    pub launch: CommandSpec,
    /// Starts the entry point through the Java classpath, bypassing Coursier.
    pub run: CommandSpec,
}

/// Builds the fetch, launch, and run commands for `descriptor`.
///
/// `launcher_dir`, when set, is the directory holding the Coursier launcher;
/// otherwise the launcher is expected on the executable search path. The
/// result depends only on the inputs.
#[must_use]
pub fn resolve_commands(
    descriptor: &ServerDescriptor,
    launcher_dir: Option<&Path>,
    platform: Platform,
) -> ServerCommands {
    let coursier = launcher_program(launcher_dir, platform);
    let java = executable_name(Tool::JavaRuntime, platform);
    let artifact = descriptor.artifact().to_string();
    let entry_point = descriptor.entry_point();

    ServerCommands {
        fetch: CommandSpec::new(coursier.clone(), ["fetch", "-p", artifact.as_str()]),
        launch: CommandSpec::new(
            coursier,
            [
                "launch",
                artifact.as_str(),
                "-M",
                entry_point,
                "--",
                STDIO_FLAG,
            ],
        ),
        run: CommandSpec::new(
            java,
            ["-classpath", artifact.as_str(), entry_point, STDIO_FLAG],
        ),
    }
}

fn launcher_program(launcher_dir: Option<&Path>, platform: Platform) -> String {
    let name = executable_name(Tool::Coursier, platform);
    match launcher_dir {
        Some(dir) => dir.join(name).to_string_lossy().into_owned(),
        None => name,
    }
}
