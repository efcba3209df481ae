use crate::output::print_json;
use crate::root;
use anyhow::Context;
use featops_core::progress::{self, ProgressReport};
use featops_core::spec::Spec;
use std::path::Path;

pub fn run(spec_path: &Path, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;
    let section = spec
        .progress
        .as_ref()
        .context("spec has no 'progress' section (set progress.check_path)")?;

    let project_root = root::project_root(spec_path);
    let report = ProgressReport::compute(project_root, &spec, section);

    report
        .write(project_root, section)
        .with_context(|| format!("failed to write {}", section.report_file))?;

    // The legacy ::set-output fallback goes to stdout, which would corrupt
    // --json output; GITHUB_OUTPUT appends to a file and is always safe.
    if std::env::var_os("GITHUB_OUTPUT").is_some() || !json {
        progress::emit_ci_output(&report).context("failed to publish CI output")?;
    }

    if json {
        print_json(&report)?;
        return Ok(());
    }

    println!(
        "Progress: {}/{} ({:.1}%)",
        report.implemented, report.total_features, report.progress_percentage
    );
    println!("Implemented: {}", report.implemented_features.join(", "));
    println!("Pending:     {}", report.pending_features.join(", "));
    if let Some(next) = report.next_feature() {
        println!("Next up:     {next}");
    }
    Ok(())
}
