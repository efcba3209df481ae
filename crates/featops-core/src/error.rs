use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatopsError {
    #[error("spec file not found: {0} (run 'featops init' to create one)")]
    SpecNotFound(PathBuf),

    #[error("invalid feature id '{0}': must start with a letter, use only letters, digits, '-' or '_', and be at most 32 characters")]
    InvalidId(String),

    #[error("duplicate feature id: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeatopsError>;
