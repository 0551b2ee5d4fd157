//! End-to-end scenarios over real search paths and project folders.


use std::fs;
use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::commands::resolve_commands;
use crate::descriptor::ServerDescriptor;
use crate::platform::{Platform, Tool, executable_name};
use crate::probe::{MarkerFileProbe, SearchPathProbe, Workspace};
use crate::readiness::{BootstrapResolver, Readiness, UnreadyReason};

/// A fake toolchain directory and project folder.
pub(crate) struct Environment {
    bin: TempDir,
    project: TempDir,
}

impl Environment {
    pub(crate) fn install(&self, tool: Tool) {
        let path = self
            .bin
            .path()
            .join(executable_name(tool, Platform::current()));
        fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write fake tool");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("mark fake tool executable");
        }
    }

    pub(crate) fn prepare_project(&self) {
        fs::write(self.project.path().join(".dotty-ide.json"), "[]").expect("write marker");
    }

    pub(crate) fn project_dir(&self) -> &Path {
        self.project.path()
    }

    pub(crate) fn workspace(&self) -> Workspace {
        Workspace::new(vec![self.project.path().to_path_buf()])
    }

    pub(crate) fn resolver(&self) -> BootstrapResolver<SearchPathProbe, MarkerFileProbe> {
        let descriptor = ServerDescriptor::dotty().expect("built-in descriptor");
        let commands = resolve_commands(&descriptor, None, Platform::current());
        BootstrapResolver::new(
            descriptor,
            commands,
            SearchPathProbe::with_search_path(Platform::current(), self.bin.path()),
            MarkerFileProbe::new(".dotty-ide.json"),
        )
    }
}

#[fixture]
pub(crate) fn env() -> Environment {
    Environment {
        bin: TempDir::new().expect("create bin dir"),
        project: TempDir::new().expect("create project dir"),
    }
}

#[rstest]
fn runtime_absent_is_reported(env: Environment) {
    env.install(Tool::BuildTool);
    env.prepare_project();

    assert_eq!(
        env.resolver().can_start(&env.workspace()),
        Readiness::NotReady(UnreadyReason::RuntimeMissing)
    );
}

#[rstest]
fn missing_marker_is_reported_once_tools_exist(env: Environment) {
    env.install(Tool::JavaRuntime);
    env.install(Tool::BuildTool);

    assert_eq!(
        env.resolver().can_start(&env.workspace()),
        Readiness::NotReady(UnreadyReason::ProjectNotPrepared)
    );
}

#[rstest]
fn prepared_project_is_ready(env: Environment) {
    env.install(Tool::JavaRuntime);
    env.install(Tool::BuildTool);
    env.prepare_project();

    assert_eq!(env.resolver().can_start(&env.workspace()), Readiness::Ready);
}

#[rstest]
fn marker_in_second_folder_is_ignored(env: Environment) {
    env.install(Tool::JavaRuntime);
    env.install(Tool::BuildTool);
    env.prepare_project();
    let empty = TempDir::new().expect("create empty folder");
    let workspace = Workspace::new(vec![
        empty.path().to_path_buf(),
        env.project_dir().to_path_buf(),
    ]);

    assert_eq!(
        env.resolver().can_start(&workspace),
        Readiness::NotReady(UnreadyReason::ProjectNotPrepared)
    );
}

#[rstest]
fn gate_follows_environment_changes(env: Environment) {
    env.install(Tool::JavaRuntime);
    env.install(Tool::BuildTool);
    let resolver = env.resolver();
    let workspace = env.workspace();

    assert!(!resolver.can_start(&workspace).is_ready());
    env.prepare_project();
    assert!(resolver.can_start(&workspace).is_ready());
    assert!(resolver.can_start(&workspace).is_ready());
}

#[rstest]
fn empty_workspace_is_never_prepared(env: Environment) {
    env.install(Tool::JavaRuntime);
    env.install(Tool::BuildTool);

    let resolver = env.resolver();
    assert!(!resolver.has_project_preparation_marker(&Workspace::new(Vec::<PathBuf>::new())));
}
