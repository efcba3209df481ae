use crate::output::print_json;
use crate::root;
use anyhow::Context;
use featops_core::spec::Spec;
use featops_core::template;
use gh_client::Git;
use std::path::Path;

pub fn run(spec_path: &Path, no_stage: bool, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;
    let sync = spec
        .sync
        .as_ref()
        .context("spec has no 'sync' section (set sync.branches and sync.paths)")?;

    if sync.branches.is_empty() {
        println!("No sync branches in spec.");
        return Ok(());
    }

    let git = Git::new(root::project_root(spec_path));

    let mut synced = 0usize;
    let mut failed = 0usize;
    for entry in &sync.branches {
        let Some(feature) = spec.feature(&entry.feature) else {
            eprintln!(
                "Skipping branch '{}': unknown feature '{}'",
                entry.branch, entry.feature
            );
            failed += 1;
            continue;
        };

        println!("Syncing {} ({}) from {}", feature.id, feature.name, entry.branch);
        for pattern in &sync.paths {
            let pattern = template::expand(pattern, feature);
            match git.checkout_from(&entry.branch, &pattern) {
                Ok(()) => {
                    synced += 1;
                    println!("  synced {pattern}");
                }
                Err(e) => {
                    // Agent branches rarely carry every pattern; a miss is
                    // expected, not fatal.
                    failed += 1;
                    eprintln!("  no files for {pattern}: {e}");
                }
            }
        }
    }

    if !no_stage {
        git.stage_all().context("failed to stage synced files")?;
        let status = git.status_short().context("failed to read git status")?;
        if !status.trim().is_empty() {
            println!("\nStaged changes:");
            print!("{status}");
        }
    }

    if json {
        print_json(&serde_json::json!({
            "synced": synced,
            "failed": failed,
            "staged": !no_stage,
        }))?;
    } else {
        println!("\nSync complete — review the changes and commit.");
    }
    Ok(())
}
