use thiserror::Error;

#[derive(Debug, Error)]
pub enum GhError {
    #[error("'{0}' not found on PATH (see https://cli.github.com for install instructions)")]
    MissingBinary(String),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("failed to parse {context} output: {source}\n  payload: {payload}")]
    Parse {
        context: &'static str,
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GhError>;
