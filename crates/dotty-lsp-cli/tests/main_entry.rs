//! Integration tests for the `dotty-lsp` binary entry point.
//!
//! Exercises configuration layering through real flags and environment
//! variables, and user-facing error handling.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn commands_honour_config_flags() {
    let mut command = cargo_bin_cmd!("dotty-lsp");
    command.args(["--artifact", "org.example:server:2.0", "commands"]);
    command
        .assert()
        .success()
        .stdout(contains("fetch -p org.example:server:2.0"));
}

#[test]
fn environment_overrides_defaults() {
    let mut command = cargo_bin_cmd!("dotty-lsp");
    command
        .env("DOTTY_LSP_ENTRY_POINT", "org.example.EnvMain")
        .arg("commands");
    command
        .assert()
        .success()
        .stdout(contains("-M org.example.EnvMain -- -stdio"));
}

#[test]
fn malformed_artifact_exits_with_failure() {
    let mut command = cargo_bin_cmd!("dotty-lsp");
    command.args(["--artifact", "broken", "client-config"]);
    command
        .assert()
        .failure()
        .stderr(contains("invalid configuration"));
}

#[test]
fn check_fails_for_unprepared_folder() {
    let folder = TempDir::new().expect("create workspace folder");
    let mut command = cargo_bin_cmd!("dotty-lsp");
    command.arg("check").arg(folder.path());
    command.assert().failure().stdout(contains("must be"));
}

#[test]
fn missing_command_exits_with_failure() {
    let mut command = cargo_bin_cmd!("dotty-lsp");
    command.assert().failure().stderr(contains("Usage"));
}
