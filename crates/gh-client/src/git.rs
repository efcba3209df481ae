//! Client for the `git` command-line tool — just the operations the sync
//! flow needs.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Result;
use crate::process::run_capture;

pub struct Git {
    program: String,
    dir: PathBuf,
}

impl Git {
    pub fn new(dir: &Path) -> Self {
        Self::with_program(dir, "git")
    }

    /// Use an alternate executable. Tests point this at a stub script.
    pub fn with_program(dir: &Path, program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dir: dir.to_path_buf(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.dir);
        cmd
    }

    /// `git checkout origin/<branch> -- <pattern>` — pull the matching
    /// files from the named remote branch into the working tree.
    pub fn checkout_from(&self, branch: &str, pattern: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["checkout", &format!("origin/{branch}"), "--", pattern]);
        run_capture(cmd)?;
        Ok(())
    }

    /// `git add -A`.
    pub fn stage_all(&self) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["add", "-A"]);
        run_capture(cmd)?;
        Ok(())
    }

    /// `git status --short`, for showing what the sync changed.
    pub fn status_short(&self) -> Result<String> {
        let mut cmd = self.command();
        cmd.args(["status", "--short"]);
        run_capture(cmd)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
