use crate::output::print_json;
use crate::root;
use anyhow::Context;
use clap::Subcommand;
use featops_core::spec::{Feature, Spec};
use featops_core::template::{self, DEFAULT_ISSUE_BODY};
use gh_client::Gh;
use std::path::Path;

#[derive(Subcommand)]
pub enum IssueSubcommand {
    /// Create one tracker issue per feature
    Create {
        /// Restrict to specific feature ids (repeatable: --feature f1 --feature f2)
        #[arg(long = "feature")]
        features: Vec<String>,

        /// Print what would be created without calling the tracker
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(spec_path: &Path, subcmd: IssueSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        IssueSubcommand::Create { features, dry_run } => {
            create(spec_path, &features, dry_run, json)
        }
    }
}

fn create(spec_path: &Path, ids: &[String], dry_run: bool, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;

    let selected: Vec<&Feature> = if ids.is_empty() {
        spec.features.iter().collect()
    } else {
        ids.iter()
            .map(|id| {
                spec.feature(id)
                    .with_context(|| format!("unknown feature id: {id}"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    let body_template = spec.issues.template.as_deref().unwrap_or(DEFAULT_ISSUE_BODY);

    if dry_run {
        for feature in &selected {
            println!("Would create: {}", template::issue_title(feature));
            println!("  labels: {}", labels_for(&spec, feature).join(","));
        }
        return Ok(());
    }

    let gh = Gh::new(root::project_root(spec_path)).context("tracker CLI unavailable")?;

    let mut created = 0usize;
    let mut failed = 0usize;
    for feature in &selected {
        let title = template::issue_title(feature);
        let body = template::expand(body_template, feature);
        let labels = labels_for(&spec, feature);

        match gh.create_issue(&title, &body, &labels) {
            Ok(url) => {
                created += 1;
                println!("Created: {title}");
                println!("  {url}");
            }
            Err(e) => {
                failed += 1;
                eprintln!("Failed to create '{title}': {e}");
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
        anyhow::bail!("all {failed} issue creations failed");
    }
    Ok(())
}

/// Base labels from the spec plus the feature's type and priority.
fn labels_for(spec: &Spec, feature: &Feature) -> Vec<String> {
    let mut labels = spec.issues.labels.clone();
    if !feature.feature_type.is_empty() && !labels.contains(&feature.feature_type) {
        labels.push(feature.feature_type.clone());
    }
    let priority = feature.priority.to_string();
    if !labels.contains(&priority) {
        labels.push(priority);
    }
    labels
}
