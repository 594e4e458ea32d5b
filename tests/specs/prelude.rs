//! Shared helpers for CLI specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::str::contains;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Nothing listens here, so every store call fails fast
pub const DEAD_STORE: &str = "redis://127.0.0.1:1";

/// Scratch directory with an optional config file
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_config(contents: &str) -> Self {
        let workspace = Self::empty();
        std::fs::write(workspace.config_path(), contents).unwrap();
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("slotlock.toml")
    }

    /// `slotlock` with a clean environment rooted in this workspace
    pub fn slotlock(&self) -> Command {
        let mut cmd = Command::cargo_bin("slotlock").unwrap();
        cmd.current_dir(self.path())
            .env_remove("SLOTLOCK_CONFIG")
            .env_remove("SLOTLOCK_STORE_URL")
            .env_remove("SLOTLOCK_LOG");
        cmd
    }
}

pub trait AssertExt {
    fn passes(self) -> Assert;
    fn exits_with(self, code: i32) -> Assert;
}

impl AssertExt for &mut Command {
    fn passes(self) -> Assert {
        self.assert().success()
    }

    fn exits_with(self, code: i32) -> Assert {
        self.assert().code(code)
    }
}

pub trait OutputExt {
    fn stdout_has(self, text: &str) -> Assert;
    fn stderr_has(self, text: &str) -> Assert;
}

impl OutputExt for Assert {
    fn stdout_has(self, text: &str) -> Assert {
        self.stdout(contains(text))
    }

    fn stderr_has(self, text: &str) -> Assert {
        self.stderr(contains(text))
    }
}
