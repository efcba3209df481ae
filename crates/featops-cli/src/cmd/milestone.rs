use crate::output::print_json;
use crate::root;
use anyhow::Context;
use clap::Subcommand;
use featops_core::spec::Spec;
use gh_client::Gh;
use std::path::Path;

#[derive(Subcommand)]
pub enum MilestoneSubcommand {
    /// Create every milestone listed in the spec
    Create,
}

pub fn run(spec_path: &Path, subcmd: MilestoneSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        MilestoneSubcommand::Create => create(spec_path, json),
    }
}

fn create(spec_path: &Path, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;

    if spec.milestones.is_empty() {
        println!("No milestones in spec.");
        return Ok(());
    }

    let gh = Gh::new(root::project_root(spec_path)).context("tracker CLI unavailable")?;

    let mut created = 0usize;
    let mut failed = 0usize;
    for ms in &spec.milestones {
        match gh.create_milestone(&ms.title, &ms.description, ms.due_on.as_deref()) {
            Ok(()) => {
                created += 1;
                println!("Created milestone: {}", ms.title);
            }
            Err(e) => {
                failed += 1;
                eprintln!("Failed to create milestone '{}': {e}", ms.title);
            }
        }
    }

    if json {
        print_json(&serde_json::json!({
            "created": created,
            "failed": failed,
        }))?;
    } else {
        println!("{created} created, {failed} failed");
    }

    if created == 0 && failed > 0 {
        anyhow::bail!("all {failed} milestone creations failed");
    }
    Ok(())
}
