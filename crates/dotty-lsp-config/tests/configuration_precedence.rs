use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use dotty_lsp_config::{Config, DEFAULT_ARTIFACT, LogFormat};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ARTIFACT_VAR: &str = "DOTTY_LSP_ARTIFACT";

struct EnvOverride {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvOverride {
    fn set_var(key: &'static str, value: &OsStr) -> Self {
        let previous = std::env::var_os(key);
        // Environment mutation is unsafe in edition 2024; callers hold
        // `ENV_MUTEX` so no other test observes the change.
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

struct Harness {
    temp_dir: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join("dotty-lsp.toml");
        fs::write(&path, contents).expect("write configuration file");
        path
    }
}

#[fixture]
fn harness() -> Harness {
    let guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    Harness {
        temp_dir: TempDir::new().expect("create temp dir"),
        _guard: guard,
    }
}

fn args(extra: &[&OsStr]) -> Vec<OsString> {
    let mut all = vec![OsString::from("dotty-lsp")];
    all.extend(extra.iter().map(|arg| arg.to_os_string()));
    all
}

#[rstest]
fn defaults_apply_without_other_layers(#[from(harness)] _harness: Harness) {
    let config = Config::load_from_iter(args(&[])).expect("load defaults");

    assert_eq!(config.artifact(), DEFAULT_ARTIFACT);
    assert_eq!(config.log_format(), LogFormat::Compact);
}

#[rstest]
fn file_overrides_defaults(harness: Harness) {
    let path = harness.write_config(
        "artifact = \"ch.epfl.lamp:dotty-language-server_0.8:0.8.0\"\nlog_format = \"json\"\n",
    );

    let config = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]))
    .expect("load with file");

    assert_eq!(
        config.artifact(),
        "ch.epfl.lamp:dotty-language-server_0.8:0.8.0"
    );
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[rstest]
fn environment_overrides_file(harness: Harness) {
    let path = harness.write_config("artifact = \"org.example:from-file:1.0\"\n");
    let _env = EnvOverride::set_var(ARTIFACT_VAR, OsStr::new("org.example:from-env:2.0"));

    let config = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]))
    .expect("load with env");

    assert_eq!(config.artifact(), "org.example:from-env:2.0");
}

#[rstest]
fn cli_overrides_environment(#[from(harness)] _harness: Harness) {
    let _env = EnvOverride::set_var(ARTIFACT_VAR, OsStr::new("org.example:from-env:2.0"));

    let config = Config::load_from_iter(args(&[
        OsStr::new("--artifact"),
        OsStr::new("org.example:from-cli:3.0"),
    ]))
    .expect("load with cli");

    assert_eq!(config.artifact(), "org.example:from-cli:3.0");
}
