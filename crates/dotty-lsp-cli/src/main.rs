//! CLI entrypoint for the Dotty language-server bootstrap.
//!
//! The binary delegates to [`dotty_lsp_cli::run`], which loads configuration,
//! installs telemetry, and dispatches the requested command against the
//! terminal host.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    let stdin: StdinLock<'_> = io::stdin().lock();
    dotty_lsp_cli::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
