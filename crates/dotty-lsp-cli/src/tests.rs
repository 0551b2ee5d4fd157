use super::*;

use std::io::Cursor;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

#[derive(Default)]
struct Captured {
    exit: Option<ExitCode>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl Captured {
    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.stdout).expect("stdout should hold JSON")
    }
}

#[fixture]
fn config() -> Config {
    Config {
        artifact: String::from("org.example:server:1.0"),
        entry_point: String::from("org.example.Main"),
        launcher_dir: Some(Utf8PathBuf::from("/opt/coursier")),
        ..Config::default()
    }
}

fn run_cli(config: Config, args: &[&str]) -> Captured {
    let mut captured = Captured::default();
    let mut stdin = Cursor::new(Vec::new());
    let argv: Vec<OsString> = std::iter::once("dotty-lsp")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let loader = StaticConfigLoader { config };
    let mut io = IoStreams::new(&mut stdin, &mut captured.stdout, &mut captured.stderr);
    let exit = run_with_loader(argv, &mut io, &loader);
    captured.exit = Some(exit);
    captured
}

#[rstest]
fn commands_lists_every_invocation(config: Config) {
    let captured = run_cli(config, &["commands"]);

    assert_eq!(captured.exit, Some(ExitCode::SUCCESS));
    let stdout = captured.stdout();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected output: {stdout}");
    assert!(lines.first().is_some_and(|line| line.starts_with("fetch ")));
    assert!(stdout.contains("coursier fetch -p org.example:server:1.0"));
    assert!(stdout.contains("coursier launch org.example:server:1.0 -M org.example.Main -- -stdio"));
    assert!(stdout.contains("-classpath org.example:server:1.0 org.example.Main -stdio"));
}

#[rstest]
fn commands_render_as_json_arrays(config: Config) {
    let captured = run_cli(config, &["commands", "--json"]);

    assert_eq!(captured.exit, Some(ExitCode::SUCCESS));
    let value = captured.json();
    let launch = value["launch"].as_array().expect("launch should be an array");
    assert_eq!(launch.last(), Some(&Value::from("-stdio")));
    assert_eq!(value["fetch"][1], Value::from("fetch"));
    assert_eq!(value["fetch"][2], Value::from("-p"));
}

#[rstest]
fn client_config_uses_launch_command(config: Config) {
    let captured = run_cli(config, &["client-config"]);

    assert_eq!(captured.exit, Some(ExitCode::SUCCESS));
    let value = captured.json();
    assert_eq!(value["name"], Value::from("dotty"));
    assert_eq!(value["enabled"], Value::Bool(false));
    assert_eq!(value["tcp_port"], Value::Null);
    assert_eq!(value["language_id"], Value::from("scala"));
    assert_eq!(value["scopes"], serde_json::json!(["source.scala"]));
    assert_eq!(value["command"][1], Value::from("launch"));
}

#[rstest]
fn check_reports_unprepared_folder(config: Config) {
    let folder = TempDir::new().expect("create workspace folder");
    let folder_arg = folder.path().to_string_lossy().into_owned();

    let captured = run_cli(config, &["check", "--json", folder_arg.as_str()]);

    assert_eq!(captured.exit, Some(ExitCode::FAILURE));
    let value = captured.json();
    assert_eq!(value["ready"], Value::Bool(false));
    assert!(value["reason"].is_string());
    let message = value["message"].as_str().expect("message should be present");
    assert!(message.contains("must be"), "unexpected message: {message}");
}

#[rstest]
fn launch_refuses_when_not_ready(config: Config) {
    let folder = TempDir::new().expect("create workspace folder");
    let folder_arg = folder.path().to_string_lossy().into_owned();

    let captured = run_cli(config, &["launch", folder_arg.as_str()]);

    assert_eq!(captured.exit, Some(ExitCode::FAILURE));
    assert!(captured.stdout.is_empty());
    assert!(
        captured.stderr().contains("dotty-language-server"),
        "status message should name the package: {}",
        captured.stderr()
    );
}

#[rstest]
fn invalid_artifact_is_reported(config: Config) {
    let broken = Config {
        artifact: String::from("not-a-coordinate"),
        ..config
    };

    let captured = run_cli(broken, &["commands"]);

    assert_eq!(captured.exit, Some(ExitCode::FAILURE));
    assert!(captured.stderr().starts_with("invalid configuration:"));
}

#[rstest]
fn unknown_commands_fail_with_usage(config: Config) {
    let captured = run_cli(config, &["observe"]);

    assert_eq!(captured.exit, Some(ExitCode::FAILURE));
    assert!(captured.stderr().contains("observe"));
}

#[rstest]
fn help_is_written_to_stdout(config: Config) {
    let captured = run_cli(config, &["--help"]);

    assert_eq!(captured.exit, Some(ExitCode::SUCCESS));
    assert!(captured.stdout().contains("client-config"));
    assert!(captured.stderr.is_empty());
}

#[rstest]
#[case(&["dotty-lsp", "--log-filter", "debug", "check"], &["dotty-lsp", "check"])]
#[case(&["dotty-lsp", "commands", "--json"], &["dotty-lsp", "commands", "--json"])]
#[case(&["dotty-lsp", "--marker-file=x.json"], &["dotty-lsp"])]
fn prepares_command_arguments(#[case] args: &[&str], #[case] expected: &[&str]) {
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    let split = split_config_arguments(&args);

    let prepared = prepare_cli_arguments(&args, &split);

    let expected: Vec<OsString> = expected.iter().map(OsString::from).collect();
    assert_eq!(prepared, expected);
}

#[rstest]
fn readiness_maps_to_exit_codes() {
    assert_eq!(exit_code_for(Readiness::Ready), ExitCode::SUCCESS);
    assert_eq!(
        exit_code_for(Readiness::NotReady(
            dotty_lsp_bootstrap::UnreadyReason::ProjectNotPrepared
        )),
        ExitCode::FAILURE
    );
}

#[rstest]
fn empty_folder_list_falls_back_to_current_directory() {
    let folders = workspace_folders(Vec::new()).expect("current directory");

    assert_eq!(folders.len(), 1);
}
