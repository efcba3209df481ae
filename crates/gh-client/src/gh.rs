//! Client for the `gh` command-line tool.
//!
//! Every method is one subprocess invocation: build argv, run to
//! completion, map stdout. JSON listings deserialize onto the records in
//! [`crate::types`].

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GhError, Result};
use crate::process::{parse_json, run_capture};
use crate::types::{Issue, PullRequest};

const ISSUE_FIELDS: &str = "number,title,labels,state,createdAt,url";
const PR_FIELDS: &str = "number,title,state,createdAt";

pub struct Gh {
    program: String,
    dir: PathBuf,
}

impl Gh {
    /// Build a client rooted at `dir`, verifying `gh` is on PATH.
    pub fn new(dir: &Path) -> Result<Self> {
        which::which("gh").map_err(|_| GhError::MissingBinary("gh".to_string()))?;
        Ok(Self::with_program(dir, "gh"))
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

    // -----------------------------------------------------------------------
    // Issues
    // -----------------------------------------------------------------------

    /// `gh issue create`. Returns the created issue's URL.
    pub fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<String> {
        let mut cmd = self.command();
        cmd.args(["issue", "create", "--title", title, "--body", body]);
        if !labels.is_empty() {
            cmd.arg("--label").arg(labels.join(","));
        }
        let out = run_capture(cmd)?;
        Ok(out.trim().to_string())
    }

    /// `gh issue list --json ...`, newest first.
    pub fn list_issues(&self, limit: u32) -> Result<Vec<Issue>> {
        let mut cmd = self.command();
        cmd.args([
            "issue",
            "list",
            "--json",
            ISSUE_FIELDS,
            "--limit",
            &limit.to_string(),
        ]);
        let out = run_capture(cmd)?;
        parse_json("issue list", &out)
    }

    /// `gh issue comment <n> --body ...`.
    pub fn comment_issue(&self, number: u64, body: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["issue", "comment", &number.to_string(), "--body", body]);
        run_capture(cmd)?;
        Ok(())
    }

    /// `gh issue edit <n> --add-label ...`.
    pub fn add_label(&self, number: u64, label: &str) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["issue", "edit", &number.to_string(), "--add-label", label]);
        run_capture(cmd)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pull requests
    // -----------------------------------------------------------------------

    /// `gh pr list --json ...`, newest first.
    pub fn list_pull_requests(&self, limit: u32) -> Result<Vec<PullRequest>> {
        let mut cmd = self.command();
        cmd.args([
            "pr",
            "list",
            "--json",
            PR_FIELDS,
            "--limit",
            &limit.to_string(),
        ]);
        let out = run_capture(cmd)?;
        parse_json("pr list", &out)
    }

    // -----------------------------------------------------------------------
    // Milestones
    // -----------------------------------------------------------------------

    /// Create a milestone through the REST endpoint; `gh` resolves
    /// `:owner/:repo` from the checkout.
    pub fn create_milestone(
        &self,
        title: &str,
        description: &str,
        due_on: Option<&str>,
    ) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["api", "repos/:owner/:repo/milestones"]);
        cmd.arg("-f").arg(format!("title={title}"));
        cmd.arg("-f").arg(format!("description={description}"));
        if let Some(due) = due_on {
            cmd.arg("-f").arg(format!("due_on={due}"));
        }
        run_capture(cmd)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write an executable stub that logs its argv and emits a fixed payload.
    fn stub(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("gh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn create_issue_returns_trimmed_url() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(
            dir.path(),
            stub(
                dir.path(),
                r#"echo "$@" > args.txt; echo "https://github.com/acme/app/issues/42""#,
            ),
        );
        let url = gh
            .create_issue("[F1] Launch", "body text", &["feature".into(), "ui".into()])
            .unwrap();
        assert_eq!(url, "https://github.com/acme/app/issues/42");

        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert!(args.contains("issue create"));
        assert!(args.contains("--label feature,ui"));
    }

    #[test]
    fn create_issue_without_labels_omits_flag() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(
            dir.path(),
            stub(dir.path(), r#"echo "$@" > args.txt; echo url"#),
        );
        gh.create_issue("t", "b", &[]).unwrap();
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert!(!args.contains("--label"));
    }

    #[test]
    fn list_issues_parses_payload() {
        let dir = TempDir::new().unwrap();
        let payload = r#"[{"number":2,"title":"[F1] Launch","labels":[{"name":"feature"}],"state":"OPEN","createdAt":"2025-06-02T10:01:08Z","url":"u"}]"#;
        let gh = Gh::with_program(dir.path(), stub(dir.path(), &format!("echo '{payload}'")));
        let issues = gh.list_issues(50).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 2);
        assert!(issues[0].has_label("feature"));
    }

    #[test]
    fn list_issues_bad_payload_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(dir.path(), stub(dir.path(), "echo 'not json'"));
        assert!(matches!(
            gh.list_issues(50),
            Err(GhError::Parse { context: "issue list", .. })
        ));
    }

    #[test]
    fn failed_call_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(
            dir.path(),
            stub(dir.path(), "echo 'GraphQL: rate limited' >&2; exit 1"),
        );
        let err = gh.comment_issue(5, "ping").unwrap_err();
        match err {
            GhError::CommandFailed { stderr, .. } => {
                assert!(stderr.contains("rate limited"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn create_milestone_passes_fields() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(dir.path(), stub(dir.path(), r#"echo "$@" > args.txt"#));
        gh.create_milestone("MVP", "Minimum viable product", Some("2024-12-31"))
            .unwrap();
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert!(args.contains("api repos/:owner/:repo/milestones"));
        assert!(args.contains("title=MVP"));
        assert!(args.contains("due_on=2024-12-31"));
    }

    #[test]
    fn create_milestone_omits_absent_due_on() {
        let dir = TempDir::new().unwrap();
        let gh = Gh::with_program(dir.path(), stub(dir.path(), r#"echo "$@" > args.txt"#));
        gh.create_milestone("Beta", "", None).unwrap();
        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert!(!args.contains("due_on"));
    }
}
