use crate::output::print_json;
use crate::root;
use anyhow::Context;
use featops_core::spec::Spec;
use gh_client::Gh;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

const ISSUE_LIMIT: u32 = 50;

pub fn run(spec_path: &Path, issues: &[u64], yes: bool, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;
    let trigger = &spec.trigger;
    let gh = Gh::new(root::project_root(spec_path)).context("tracker CLI unavailable")?;

    let targets: Vec<u64> = if !issues.is_empty() {
        issues.to_vec()
    } else {
        let all = gh
            .list_issues(ISSUE_LIMIT)
            .context("failed to fetch issues")?;
        let detected: Vec<u64> = all
            .iter()
            .filter(|i| !i.has_label("implemented") && i.has_any_label(&trigger.feature_labels))
            .map(|i| i.number)
            .collect();

        if detected.is_empty() {
            println!("No unimplemented feature issues found.");
            return Ok(());
        }

        let listed = detected
            .iter()
            .map(|n| format!("#{n}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Found {} unimplemented issues: {listed}", detected.len());

        if !yes && !confirm("Trigger the agent on all of them?")? {
            println!("Cancelled.");
            return Ok(());
        }
        detected
    };

    let mut triggered = 0usize;
    let mut failed = 0usize;
    for (i, number) in targets.iter().enumerate() {
        if i > 0 && trigger.delay_seconds > 0 {
            println!("  waiting {}s before the next trigger...", trigger.delay_seconds);
            std::thread::sleep(Duration::from_secs(trigger.delay_seconds));
        }

        match gh.comment_issue(*number, &trigger.mention) {
            Ok(()) => {
                triggered += 1;
                println!("Commented on issue #{number}");
            }
            Err(e) => {
                failed += 1;
                eprintln!("Failed to comment on issue #{number}: {e}");
            }
        }
    }

    if json {
        print_json(&serde_json::json!({
            "triggered": triggered,
            "failed": failed,
        }))?;
    } else {
        println!("{triggered} triggered, {failed} failed");
    }

    if triggered == 0 && failed > 0 {
        anyhow::bail!("all {failed} triggers failed");
    }
    Ok(())
}

/// Ask for a y/N confirmation on the terminal. A non-interactive stdin
/// counts as "no" so CI runs must pass --yes explicitly.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        println!("Non-interactive session — pass --yes to proceed.");
        return Ok(false);
    }

    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y"))
}
