use crate::error::{FeatopsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

pub const SPEC_FILE: &str = "featops.yaml";

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority: {s}")),
        }
    }
}

fn default_priority() -> Priority {
    Priority::Medium
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// One product feature from the spec file. The `type` field is a free-form
/// category string (e.g. `ui`, `ai_service`, `backend`) because the label
/// vocabulary is project-specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub feature_type: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_\-]*$").unwrap())
}

pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 32 || !id_re().is_match(id) {
        return Err(FeatopsError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSection {
    /// Path template checked for existence per feature, relative to the
    /// project root. Placeholders: `{id}`, `{ID}`, `{name}`.
    pub check_path: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

fn default_report_file() -> String {
    "progress.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesSection {
    /// Labels applied to every created issue, in addition to the feature's
    /// type and priority.
    #[serde(default = "default_issue_labels")]
    pub labels: Vec<String>,
    /// Optional override for the issue body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

fn default_issue_labels() -> Vec<String> {
    vec!["feature".to_string()]
}

impl Default for IssuesSection {
    fn default() -> Self {
        Self {
            labels: default_issue_labels(),
            template: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneDef {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncBranch {
    /// Remote branch name (without the `origin/` prefix).
    pub branch: String,
    /// Feature id whose files the branch carries.
    pub feature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSection {
    #[serde(default)]
    pub branches: Vec<SyncBranch>,
    /// Path patterns handed to `git checkout <branch> -- <pattern>`,
    /// expanded per feature.
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSection {
    /// Comment body posted on each targeted issue.
    #[serde(default = "default_mention")]
    pub mention: String,
    /// Pause between successive comment calls, in seconds.
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
    /// An issue is a trigger candidate when it carries at least one of
    /// these labels and does not carry `implemented`.
    #[serde(default = "default_feature_labels")]
    pub feature_labels: Vec<String>,
}

fn default_mention() -> String {
    "@claude Please implement this feature as described above.".to_string()
}

fn default_delay_seconds() -> u64 {
    30
}

fn default_feature_labels() -> Vec<String> {
    vec!["feature".to_string()]
}

impl Default for TriggerSection {
    fn default() -> Self {
        Self {
            mention: default_mention(),
            delay_seconds: default_delay_seconds(),
            feature_labels: default_feature_labels(),
        }
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecWarning {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Spec (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spec {
    pub project: ProjectSection,
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressSection>,
    #[serde(default)]
    pub issues: IssuesSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<MilestoneDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncSection>,
    #[serde(default)]
    pub trigger: TriggerSection,
}

impl Spec {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FeatopsError::SpecNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let spec: Spec = serde_yaml::from_str(&data)?;
        spec.check_ids()?;
        Ok(spec)
    }

    fn check_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for feature in &self.features {
            validate_id(&feature.id)?;
            if !seen.insert(feature.id.as_str()) {
                return Err(FeatopsError::DuplicateId(feature.id.clone()));
            }
        }
        Ok(())
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Static consistency checks beyond what deserialization enforces.
    /// Returns human-readable warnings; an empty list means the spec is clean.
    pub fn validate(&self) -> Vec<SpecWarning> {
        let mut warnings = Vec::new();

        if self.features.is_empty() {
            warnings.push(SpecWarning {
                message: "spec has no features".to_string(),
            });
        }

        if let Some(sync) = &self.sync {
            for entry in &sync.branches {
                if self.feature(&entry.feature).is_none() {
                    warnings.push(SpecWarning {
                        message: format!(
                            "sync branch '{}' references unknown feature '{}'",
                            entry.branch, entry.feature
                        ),
                    });
                }
            }
            if !sync.branches.is_empty() && sync.paths.is_empty() {
                warnings.push(SpecWarning {
                    message: "sync has branches but no path patterns".to_string(),
                });
            }
        }

        if self.trigger.delay_seconds == 0 {
            warnings.push(SpecWarning {
                message: "trigger.delay_seconds is 0 — successive comments may hit API rate limits"
                    .to_string(),
            });
        }

        if self.issues.labels.is_empty() {
            warnings.push(SpecWarning {
                message: "issues.labels is empty — created issues will carry only type/priority labels"
                    .to_string(),
            });
        }

        for ms in &self.milestones {
            if ms.title.trim().is_empty() {
                warnings.push(SpecWarning {
                    message: "milestone with an empty title".to_string(),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
