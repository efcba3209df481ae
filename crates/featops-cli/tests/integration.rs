use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn featops(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("featops").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("FEATOPS_SPEC")
        .env_remove("GITHUB_OUTPUT");
    cmd
}

fn write_spec(dir: &TempDir, body: &str) {
    std::fs::write(dir.path().join("featops.yaml"), body).unwrap();
}

const TWO_FEATURES: &str = "\
project:
  name: voice-app
features:
  - id: f1
    name: Launch screen
    description: Splash and session bootstrap
    type: ui
    priority: high
  - id: f2
    name: Recording
    type: audio_capture
progress:
  check_path: \"src/{ID}.txt\"
";

// ---------------------------------------------------------------------------
// featops init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_spec() {
    let dir = TempDir::new().unwrap();
    featops(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(dir.path().join("featops.yaml").exists());
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, "project: {name: keep}\nfeatures: []\n");
    featops(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("left unchanged"));
    let content = std::fs::read_to_string(dir.path().join("featops.yaml")).unwrap();
    assert!(content.contains("keep"));
}

#[test]
fn init_scaffold_passes_check() {
    let dir = TempDir::new().unwrap();
    featops(&dir).arg("init").assert().success();
    featops(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings."));
}

// ---------------------------------------------------------------------------
// featops progress
// ---------------------------------------------------------------------------

#[test]
fn progress_reports_and_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, TWO_FEATURES);
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/F1.txt"), "").unwrap();

    featops(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 1/2 (50.0%)"))
        .stdout(predicate::str::contains("Next up:     f2"))
        .stdout(predicate::str::contains("::set-output name=next_feature::f2"));

    let report = std::fs::read_to_string(dir.path().join("progress.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(json["total_features"], 2);
    assert_eq!(json["implemented"], 1);
    assert_eq!(json["implemented_features"][0], "f1");
    assert_eq!(json["pending_features"][0], "f2");
}

#[test]
fn progress_appends_to_github_output() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, TWO_FEATURES);
    let out_file = dir.path().join("gh_output.txt");

    featops(&dir)
        .arg("progress")
        .env("GITHUB_OUTPUT", &out_file)
        .assert()
        .success()
        // Modern channel replaces the legacy stdout line
        .stdout(predicate::str::contains("::set-output").not());

    let content = std::fs::read_to_string(&out_file).unwrap();
    assert_eq!(content, "next_feature=f1\n");
}

#[test]
fn progress_json_is_pure_json() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, TWO_FEATURES);

    let output = featops(&dir)
        .args(["progress", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total_features"], 2);
    assert_eq!(json["progress_percentage"], 0.0);
}

#[test]
fn progress_without_spec_fails() {
    let dir = TempDir::new().unwrap();
    featops(&dir)
        .arg("progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("spec file not found"));
}

#[test]
fn progress_without_section_fails() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, "project: {name: p}\nfeatures: [{id: f1, name: A}]\n");
    featops(&dir)
        .arg("progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 'progress' section"));
}

// ---------------------------------------------------------------------------
// featops issue create
// ---------------------------------------------------------------------------

#[test]
fn issue_create_dry_run_lists_titles_and_labels() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, TWO_FEATURES);
    featops(&dir)
        .args(["issue", "create", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create: [F1] Launch screen"))
        .stdout(predicate::str::contains("labels: feature,ui,high"))
        .stdout(predicate::str::contains("Would create: [F2] Recording"))
        .stdout(predicate::str::contains("labels: feature,audio_capture,medium"));
}

#[test]
fn issue_create_unknown_feature_fails() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, TWO_FEATURES);
    featops(&dir)
        .args(["issue", "create", "--feature", "f9", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown feature id: f9"));
}

// ---------------------------------------------------------------------------
// featops check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_warnings() {
    let dir = TempDir::new().unwrap();
    write_spec(
        &dir,
        "\
project:
  name: p
features:
  - id: f1
    name: A
trigger:
  delay_seconds: 0
",
    );
    featops(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 warning(s):"))
        .stdout(predicate::str::contains("delay_seconds"));
}

#[test]
fn check_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    write_spec(
        &dir,
        "project: {name: p}\nfeatures: [{id: f1, name: A}, {id: f1, name: B}]\n",
    );
    featops(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate feature id: f1"));
}

// ---------------------------------------------------------------------------
// Subprocess-backed commands, run against stub executables
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod with_stubs {
    use super::*;
    use std::path::Path;

    /// Install an executable stub under `<dir>/bin` and return a PATH value
    /// that resolves it first.
    fn install_stub(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let bin = dir.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let path = bin.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        format!(
            "{}:{}",
            bin.display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    #[test]
    fn trigger_comments_each_issue() {
        let dir = TempDir::new().unwrap();
        write_spec(
            &dir,
            "\
project:
  name: p
features:
  - id: f1
    name: A
trigger:
  mention: \"@agent go\"
  delay_seconds: 0
",
        );
        let path = install_stub(dir.path(), "gh", r#"echo "$@" >> gh.log"#);

        featops(&dir)
            .args(["trigger", "--issue", "3", "--issue", "4"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Commented on issue #3"))
            .stdout(predicate::str::contains("Commented on issue #4"))
            .stdout(predicate::str::contains("2 triggered, 0 failed"));

        let log = std::fs::read_to_string(dir.path().join("gh.log")).unwrap();
        assert_eq!(
            log,
            "issue comment 3 --body @agent go\nissue comment 4 --body @agent go\n"
        );
    }

    #[test]
    fn trigger_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        write_spec(
            &dir,
            "\
project:
  name: p
features:
  - id: f1
    name: A
trigger:
  delay_seconds: 0
",
        );
        // First call fails, later calls succeed.
        let path = install_stub(
            dir.path(),
            "gh",
            r#"if [ ! -f seen ]; then touch seen; echo 'boom' >&2; exit 1; fi
echo "$@" >> gh.log"#,
        );

        featops(&dir)
            .args(["trigger", "--issue", "5", "--issue", "6"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 triggered, 1 failed"))
            .stderr(predicate::str::contains("Failed to comment on issue #5"));
    }

    #[test]
    fn sync_pulls_patterns_and_stages() {
        let dir = TempDir::new().unwrap();
        write_spec(
            &dir,
            "\
project:
  name: p
features:
  - id: f1
    name: A
sync:
  branches:
    - branch: agent/issue-2
      feature: f1
  paths:
    - \"src/**/{ID}*\"
",
        );
        let path = install_stub(dir.path(), "git", r#"echo "$@" >> git.log"#);

        featops(&dir)
            .arg("sync")
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Syncing f1 (A) from agent/issue-2"))
            .stdout(predicate::str::contains("Sync complete"));

        let log = std::fs::read_to_string(dir.path().join("git.log")).unwrap();
        assert!(log.contains("checkout origin/agent/issue-2 -- src/**/F1*"));
        assert!(log.contains("add -A"));
        assert!(log.contains("status --short"));
    }

    #[test]
    fn sync_no_stage_skips_git_add() {
        let dir = TempDir::new().unwrap();
        write_spec(
            &dir,
            "\
project:
  name: p
features:
  - id: f1
    name: A
sync:
  branches:
    - branch: b1
      feature: f1
  paths:
    - \"{id}/*\"
",
        );
        let path = install_stub(dir.path(), "git", r#"echo "$@" >> git.log"#);

        featops(&dir)
            .args(["sync", "--no-stage"])
            .env("PATH", path)
            .assert()
            .success();

        let log = std::fs::read_to_string(dir.path().join("git.log")).unwrap();
        assert!(!log.contains("add -A"));
    }

    #[test]
    fn dashboard_buckets_issues() {
        let dir = TempDir::new().unwrap();
        write_spec(&dir, "project: {name: voice-app}\nfeatures: [{id: f1, name: A}]\n");
        let path = install_stub(
            dir.path(),
            "gh",
            r#"if [ "$1" = "issue" ]; then
  echo '[{"number":2,"title":"[F1] Launch","labels":[{"name":"implemented"}],"state":"OPEN","createdAt":"2025-06-02T10:01:08Z","url":"u"},{"number":3,"title":"[F2] Rec","labels":[{"name":"ready-to-implement"}],"state":"OPEN","createdAt":"2025-06-02T10:02:08Z","url":"u"},{"number":4,"title":"[F3] Chat","labels":[{"name":"feature"}],"state":"OPEN","createdAt":"2025-06-02T10:03:08Z","url":"u"}]'
else
  echo '[{"number":9,"title":"F1 implementation","state":"OPEN","createdAt":"2025-06-02T11:00:00Z"}]'
fi"#,
        );

        featops(&dir)
            .arg("dashboard")
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Issues: 3 total — 1 implemented (33.3%), 1 in progress, 1 not started",
            ))
            .stdout(predicate::str::contains("#4    [F3] Chat"))
            .stdout(predicate::str::contains("Recent PRs:"))
            .stdout(predicate::str::contains("#9"))
            .stdout(predicate::str::contains("featops trigger --issue 4"));
    }

    #[test]
    fn issue_create_reports_urls() {
        let dir = TempDir::new().unwrap();
        write_spec(&dir, TWO_FEATURES);
        let path = install_stub(
            dir.path(),
            "gh",
            r#"echo "$@" >> gh.log; echo "https://github.com/acme/app/issues/42""#,
        );

        featops(&dir)
            .args(["issue", "create", "--feature", "f1"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: [F1] Launch screen"))
            .stdout(predicate::str::contains("issues/42"))
            .stdout(predicate::str::contains("1 created, 0 failed"));

        let log = std::fs::read_to_string(dir.path().join("gh.log")).unwrap();
        assert!(log.contains("--label feature,ui,high"));
    }

    #[test]
    fn milestone_create_from_spec() {
        let dir = TempDir::new().unwrap();
        write_spec(
            &dir,
            "\
project:
  name: p
features:
  - id: f1
    name: A
milestones:
  - title: MVP
    description: Minimum viable product
    due_on: \"2026-12-31\"
  - title: Beta
",
        );
        let path = install_stub(dir.path(), "gh", r#"echo "$@" >> gh.log"#);

        featops(&dir)
            .args(["milestone", "create"])
            .env("PATH", path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Created milestone: MVP"))
            .stdout(predicate::str::contains("2 created, 0 failed"));

        let log = std::fs::read_to_string(dir.path().join("gh.log")).unwrap();
        assert!(log.contains("title=MVP"));
        assert!(log.contains("due_on=2026-12-31"));
        assert!(log.contains("title=Beta"));
    }
}
