use crate::output::print_json;
use anyhow::Context;
use featops_core::spec::Spec;
use std::path::Path;

pub fn run(spec_path: &Path, json: bool) -> anyhow::Result<()> {
    let spec = Spec::load(spec_path).context("failed to load spec")?;
    let warnings = spec.validate();

    if json {
        print_json(&serde_json::json!({
            "project": spec.project.name,
            "features": spec.features.len(),
            "warnings": warnings,
        }))?;
        return Ok(());
    }

    println!(
        "Spec: {} ({} features)",
        spec.project.name,
        spec.features.len()
    );

    if warnings.is_empty() {
        println!("No warnings.");
    } else {
        println!("{} warning(s):", warnings.len());
        for w in &warnings {
            println!("  - {}", w.message);
        }
    }
    Ok(())
}
