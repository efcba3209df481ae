use crate::output::{percent, print_json, print_table};
use crate::root;
use anyhow::Context;
use chrono::Utc;
use featops_core::spec::Spec;
use gh_client::{Gh, Issue};
use std::path::Path;

const ISSUE_LIMIT: u32 = 50;
const PR_LIMIT: u32 = 5;
const DONE_SHOWN: usize = 5;

pub fn run(spec_path: &Path, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;
    let gh = Gh::new(root::project_root(spec_path)).context("tracker CLI unavailable")?;

    let issues = gh
        .list_issues(ISSUE_LIMIT)
        .context("failed to fetch issues")?;

    let mut implemented: Vec<&Issue> = Vec::new();
    let mut in_progress: Vec<&Issue> = Vec::new();
    let mut not_started: Vec<&Issue> = Vec::new();
    for issue in &issues {
        if issue.has_label("implemented") {
            implemented.push(issue);
        } else if issue.has_label("ready-to-implement") {
            in_progress.push(issue);
        } else {
            not_started.push(issue);
        }
    }

    // PRs are decoration; a failed fetch degrades to an empty list.
    let prs = match gh.list_pull_requests(PR_LIMIT) {
        Ok(prs) => prs,
        Err(e) => {
            tracing::warn!("failed to fetch pull requests: {e}");
            Vec::new()
        }
    };

    if json {
        let bucket = |items: &[&Issue]| -> Vec<serde_json::Value> {
            items
                .iter()
                .map(|i| serde_json::json!({ "number": i.number, "title": i.title }))
                .collect()
        };
        print_json(&serde_json::json!({
            "project": spec.project.name,
            "generated_at": Utc::now().to_rfc3339(),
            "total_issues": issues.len(),
            "implemented": bucket(&implemented),
            "in_progress": bucket(&in_progress),
            "not_started": bucket(&not_started),
            "recent_prs": prs,
        }))?;
        return Ok(());
    }

    println!("Dashboard: {}", spec.project.name);
    println!("Date: {} UTC", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    println!();

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    println!(
        "Issues: {} total — {} implemented ({}), {} in progress, {} not started",
        issues.len(),
        implemented.len(),
        percent(implemented.len(), issues.len()),
        in_progress.len(),
        not_started.len()
    );

    if !not_started.is_empty() {
        println!("\nNot started:");
        for issue in &not_started {
            println!("  #{:<4} {}", issue.number, issue.title);
        }
    }

    if !in_progress.is_empty() {
        println!("\nIn progress:");
        for issue in &in_progress {
            println!("  #{:<4} {}", issue.number, issue.title);
        }
    }

    if !implemented.is_empty() {
        println!("\nImplemented (latest {}):", DONE_SHOWN.min(implemented.len()));
        for issue in implemented.iter().take(DONE_SHOWN) {
            println!("  #{:<4} {}", issue.number, issue.title);
        }
        if implemented.len() > DONE_SHOWN {
            println!("  ... and {} more", implemented.len() - DONE_SHOWN);
        }
    }

    if !prs.is_empty() {
        println!("\nRecent PRs:");
        let rows: Vec<Vec<String>> = prs
            .iter()
            .map(|pr| {
                vec![
                    format!("#{}", pr.number),
                    pr.state.clone(),
                    pr.title.clone(),
                ]
            })
            .collect();
        print_table(&["PR", "STATE", "TITLE"], &rows);
    }

    println!("\nNext actions:");
    if let Some(first) = not_started.first() {
        println!("  start issue #{}: featops trigger --issue {}", first.number, first.number);
        println!("    (or label it: gh issue edit {} --add-label ready-to-implement)", first.number);
    }
    if let Some(first) = in_progress.first() {
        println!("  review progress on issue #{}: gh issue view {}", first.number, first.number);
    }
    println!("  trigger every pending issue: featops trigger");

    Ok(())
}
