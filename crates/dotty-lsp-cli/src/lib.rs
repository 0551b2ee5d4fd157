//! Terminal host for the Dotty language-server bootstrap.
//!
//! The runtime owns argument parsing, configuration loading, and dispatch of
//! the `check`, `commands`, `client-config`, `setup`, and `launch` commands
//! against the bootstrap resolver. Configuration loading and IO streams can
//! be substituted so the whole flow is exercised from tests.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};

use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;

use dotty_lsp_bootstrap::{
    BootstrapSettings, DottyHandler, LanguageHandler, MarkerFileProbe, Platform, Readiness,
    SearchPathProbe, SetupOutcome, SpawnLauncher, Workspace,
};
use dotty_lsp_config::Config;

mod cli;
mod config;
mod errors;
mod telemetry;
mod terminal;

use cli::{Cli, CliCommand};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use terminal::TerminalHost;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `dotty_lsp_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--package-name",
    "--artifact",
    "--entry-point",
    "--launcher-dir",
    "--marker-file",
];

const CLI_TARGET: &str = "dotty_lsp_cli";

type SystemHandler = DottyHandler<SearchPathProbe, MarkerFileProbe>;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, R: BufRead, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, R: BufRead, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) fn new(stdin: &'a mut R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    ready: bool,
    reason: Option<&'static str>,
    message: Option<String>,
}

struct CliRunner<'a, 'io, R: BufRead, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, R, W, E>,
    loader: &'a L,
}

impl<'a, 'io, R, W, E, L> CliRunner<'a, 'io, R, W, E, L>
where
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(io: &'a mut IoStreams<'io, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(cli) => cli,
            Err(error) if is_informational(&error) => {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.report(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| self.execute(cli.command, &config));

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => self.report(&error),
        }
    }

    fn report(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.io.stderr, "{error}");
        ExitCode::FAILURE
    }

    fn execute(&mut self, command: CliCommand, config: &Config) -> Result<ExitCode, AppError> {
        telemetry::initialise(config)?;
        let settings = BootstrapSettings::from_config(config, Platform::current())?;
        let handler = DottyHandler::new(settings.system_resolver());
        tracing::debug!(
            target: CLI_TARGET,
            package = handler.resolver().descriptor().package(),
            platform = settings.platform().as_str(),
            "resolved bootstrap settings"
        );

        match command {
            CliCommand::Check { json, folders } => self.check(&handler, folders, json),
            CliCommand::Commands { json } => self.commands(&handler, json),
            CliCommand::ClientConfig => self.emit_json(handler.config()),
            CliCommand::Setup { yes } => self.setup(&handler, yes),
            CliCommand::Launch { direct, folders } => self.launch(&handler, folders, direct),
        }
    }

    fn check(
        &mut self,
        handler: &SystemHandler,
        folders: Vec<PathBuf>,
        json: bool,
    ) -> Result<ExitCode, AppError> {
        let workspace = Workspace::new(workspace_folders(folders)?);
        let readiness = handler.resolver().can_start(&workspace);
        let package = handler.resolver().descriptor().package();
        let report = CheckReport {
            ready: readiness.is_ready(),
            reason: readiness.reason().map(|reason| reason.as_str()),
            message: readiness.reason().map(|reason| reason.status_message(package)),
        };

        if json {
            self.emit_json(&report)?;
        } else {
            let line = report.message.as_deref().unwrap_or("ready");
            writeln!(self.io.stdout, "{line}").map_err(AppError::Write)?;
        }
        Ok(exit_code_for(readiness))
    }

    fn commands(&mut self, handler: &SystemHandler, json: bool) -> Result<ExitCode, AppError> {
        let commands = handler.resolver().commands();
        if json {
            return self.emit_json(commands);
        }

        for (label, command) in [
            ("fetch", &commands.fetch),
            ("launch", &commands.launch),
            ("run", &commands.run),
        ] {
            writeln!(self.io.stdout, "{label:<7}{command}").map_err(AppError::Write)?;
        }
        Ok(ExitCode::SUCCESS)
    }

    fn setup(&mut self, handler: &SystemHandler, assume_yes: bool) -> Result<ExitCode, AppError> {
        let launcher = SpawnLauncher::new();
        let outcome = {
            let host = TerminalHost::new(&mut *self.io.stdin, &mut *self.io.stderr, Vec::new())
                .assume_yes(assume_yes);
            handler.run_setup(&host, &launcher)?
        };

        match outcome {
            SetupOutcome::Aborted(reason) => {
                tracing::info!(target: CLI_TARGET, reason = reason.as_str(), "setup aborted");
                Ok(ExitCode::FAILURE)
            }
            SetupOutcome::Declined => {
                writeln!(self.io.stdout, "setup cancelled").map_err(AppError::Write)?;
                Ok(ExitCode::SUCCESS)
            }
            SetupOutcome::FetchStarted(handle) => {
                let package = handler.resolver().descriptor().package();
                writeln!(
                    self.io.stdout,
                    "fetching {package} in the background (pid {})",
                    handle.pid()
                )
                .map_err(AppError::Write)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn launch(
        &mut self,
        handler: &SystemHandler,
        folders: Vec<PathBuf>,
        direct: bool,
    ) -> Result<ExitCode, AppError> {
        let folders = workspace_folders(folders)?;
        let ready = {
            let host = TerminalHost::new(&mut *self.io.stdin, &mut *self.io.stderr, folders);
            handler.can_start(&host)
        };
        if !ready {
            return Ok(ExitCode::FAILURE);
        }

        let commands = handler.resolver().commands();
        let command = if direct {
            &commands.run
        } else {
            &commands.launch
        };
        tracing::info!(target: CLI_TARGET, %command, "starting language server");
        let status = command
            .to_command()
            .status()
            .map_err(|source| AppError::Run {
                program: command.program().to_owned(),
                source,
            })?;
        tracing::info!(target: CLI_TARGET, %status, "language server exited");
        Ok(exit_code_from_status(status))
    }

    fn emit_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<ExitCode, AppError> {
        let rendered = serde_json::to_string_pretty(value).map_err(AppError::Serialise)?;
        writeln!(self.io.stdout, "{rendered}").map_err(AppError::Write)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, mut stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(&mut stdin, stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    if let Some(rest) = args.get(split.command_start..) {
        cli_arguments.extend(rest.iter().cloned());
    }
    cli_arguments
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Falls back to the current directory when no folders were given.
fn workspace_folders(folders: Vec<PathBuf>) -> Result<Vec<PathBuf>, AppError> {
    if !folders.is_empty() {
        return Ok(folders);
    }
    let current = std::env::current_dir().map_err(AppError::CurrentDir)?;
    Ok(vec![current])
}

fn exit_code_for(readiness: Readiness) -> ExitCode {
    if readiness.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn exit_code_from_status(status: ExitStatus) -> ExitCode {
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests;
