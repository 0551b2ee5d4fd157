//! Command-line interface definitions for the terminal host.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bootstrap and launch the Dotty language server from a terminal.
#[derive(Parser, Debug)]
#[command(name = "dotty-lsp", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Commands understood by the terminal host.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Checks whether the server could start for the given folders.
    Check {
        /// Prints the result as JSON.
        #[arg(long)]
        json: bool,
        /// Workspace folders; only the first is inspected for the marker.
        #[arg(value_name = "FOLDER")]
        folders: Vec<PathBuf>,
    },
    /// Prints the fetch, launch, and run command lines.
    Commands {
        /// Prints the commands as JSON arrays.
        #[arg(long)]
        json: bool,
    },
    /// Prints the client configuration handed to editors as JSON.
    ClientConfig,
    /// Fetches the server package after confirmation.
    Setup {
        /// Skips the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Starts the server over stdio once the readiness gate passes.
    Launch {
        /// Runs the entry point through the Java classpath instead of Coursier.
        #[arg(long)]
        direct: bool,
        /// Workspace folders; only the first is inspected for the marker.
        #[arg(value_name = "FOLDER")]
        folders: Vec<PathBuf>,
    },
}
