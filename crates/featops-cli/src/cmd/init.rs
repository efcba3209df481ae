use anyhow::Context;
use featops_core::io;
use std::path::Path;

const STARTER_SPEC: &str = r#"# featops feature specification
project:
  name: my-app
  description: Describe the product here

features:
  - id: f1
    name: Launch screen
    description: Splash screen and session bootstrap
    type: ui
    priority: high
  - id: f2
    name: Audio recording
    description: Capture audio with pause/resume
    type: audio_capture
    priority: medium

# A feature counts as implemented when this path exists.
progress:
  check_path: "src/views/{ID}View.swift"
  report_file: progress.json

issues:
  labels: [feature]

milestones:
  - title: MVP
    description: Minimum viable product
    due_on: "2026-12-31"

# Branches produced by the implementation agent, and the path patterns
# to pull from them.
sync:
  branches: []
  paths:
    - "src/**/{ID}*"

trigger:
  mention: "@claude Please implement this feature as described above."
  delay_seconds: 30
  feature_labels: [feature, ui, audio_capture, ai_service, backend, infrastructure]
"#;

pub fn run(spec_path: &Path) -> anyhow::Result<()> {
    let written = io::write_if_missing(spec_path, STARTER_SPEC.as_bytes())
        .with_context(|| format!("failed to write {}", spec_path.display()))?;

    if written {
        println!("Created {}", spec_path.display());
        println!("Next: edit the feature list, then run 'featops check'");
    } else {
        println!("{} already exists — left unchanged", spec_path.display());
    }
    Ok(())
}
