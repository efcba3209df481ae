//! Records deserialized from `gh ... --json` output.
//!
//! Field names follow the GitHub CLI's camelCase wire format; nothing here
//! is persisted — every record is request-scoped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub url: String,
}

impl Issue {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn has_any_label(&self, names: &[String]) -> bool {
        self.labels.iter().any(|l| names.contains(&l.name))
    }
}

// ---------------------------------------------------------------------------
// PullRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == "OPEN"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
