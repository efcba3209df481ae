use crate::error::Result;
use crate::io;
use crate::spec::{ProgressSection, Spec};
use crate::template;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ProgressReport
// ---------------------------------------------------------------------------

/// Implementation-progress snapshot. The key set is wire-stable: CI jobs
/// parse the generated JSON by these exact names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub total_features: usize,
    pub implemented: usize,
    pub progress_percentage: f64,
    pub implemented_features: Vec<String>,
    pub pending_features: Vec<String>,
}

impl ProgressReport {
    /// Scan the project tree: a feature counts as implemented when its
    /// expanded `check_path` exists under `root`.
    pub fn compute(root: &Path, spec: &Spec, progress: &ProgressSection) -> Self {
        let mut implemented = Vec::new();
        let mut pending = Vec::new();

        for feature in &spec.features {
            let rel = template::expand(&progress.check_path, feature);
            if root.join(&rel).exists() {
                implemented.push(feature.id.clone());
            } else {
                pending.push(feature.id.clone());
            }
        }

        let total = spec.features.len();
        let done = implemented.len();
        let percentage = if total > 0 {
            done as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_features: total,
            implemented: done,
            progress_percentage: percentage,
            implemented_features: implemented,
            pending_features: pending,
        }
    }

    /// First pending feature id, the next one to implement.
    pub fn next_feature(&self) -> Option<&str> {
        self.pending_features.first().map(String::as_str)
    }

    pub fn write(&self, root: &Path, progress: &ProgressSection) -> Result<()> {
        let path = root.join(&progress.report_file);
        let data = serde_json::to_vec_pretty(self)?;
        io::atomic_write(&path, &data)
    }
}

// ---------------------------------------------------------------------------
// CI output
// ---------------------------------------------------------------------------

/// Publish `next_feature` for downstream workflow steps.
///
/// When `GITHUB_OUTPUT` points at a file, appends `next_feature=<id>` there;
/// otherwise falls back to the legacy `::set-output` workflow command so the
/// tool still works on old runners.
pub fn emit_ci_output(report: &ProgressReport) -> Result<()> {
    let next = report.next_feature().unwrap_or("");
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => io::append_text(Path::new(&path), &format!("next_feature={next}\n")),
        None => {
            println!("::set-output name=next_feature::{next}");
            Ok(())
        }
    }
}
