//! Shared harness for crontag CLI tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated environment with a stub crontab executable standing in for the
/// system scheduler. The stub persists its state to a file, so assertions
/// can inspect exactly what a save wrote.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    crontab: PathBuf,
    state: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let state = root.path().join("crontab.state");
        let crontab = root.path().join("crontab");

        let script = format!(
            "#!/bin/sh\n\
             STATE=\"{state}\"\n\
             case \"$1\" in\n\
             -l)\n\
             \tif [ -f \"$STATE\" ]; then\n\
             \t\tcat \"$STATE\"\n\
             \telse\n\
             \t\techo 'no crontab for stub' >&2\n\
             \t\texit 1\n\
             \tfi\n\
             \t;;\n\
             -)\n\
             \tcat > \"$STATE\"\n\
             \t;;\n\
             *)\n\
             \texit 64\n\
             \t;;\n\
             esac\n",
            state = state.display()
        );
        fs::write(&crontab, script).expect("Failed to write stub crontab");
        let mut permissions =
            fs::metadata(&crontab).expect("Failed to stat stub crontab").permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&crontab, permissions).expect("Failed to chmod stub crontab");

        Self { root, crontab, state }
    }

    /// Absolute path of the environment root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the stub crontab executable.
    pub fn crontab_path(&self) -> &Path {
        &self.crontab
    }

    /// Pre-load the stub scheduler with crontab text.
    pub fn seed(&self, content: &str) {
        fs::write(&self.state, content).expect("Failed to seed crontab state");
    }

    /// Text the stub scheduler currently holds.
    pub fn stored(&self) -> String {
        fs::read_to_string(&self.state).unwrap_or_default()
    }

    /// Build a command for the compiled `crontag` binary against the stub.
    pub fn cli(&self) -> Command {
        let mut cmd = self.cli_bare();
        cmd.arg("--crontab").arg(&self.crontab);
        cmd
    }

    /// Same, without the `--crontab` override (configuration-file tests).
    pub fn cli_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("crontag").expect("Failed to locate crontag binary");
        cmd.current_dir(self.root.path());
        cmd
    }
}
