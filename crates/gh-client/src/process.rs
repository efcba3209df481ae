//! Subprocess invocation shared by the `gh` and `git` clients.
//!
//! All boundary calls follow the same shape: spawn with piped stdout and
//! stderr, wait for exit, and map a non-zero status to a typed error that
//! carries a stderr excerpt. Execution is strictly sequential; nothing here
//! is concurrent.

use std::process::{Command, Stdio};

use crate::error::{GhError, Result};

const EXCERPT_LEN: usize = 500;

/// Truncate diagnostic output so errors stay readable.
pub(crate) fn excerpt(s: &str) -> String {
    s.chars().take(EXCERPT_LEN).collect()
}

/// Run a command to completion, returning its stdout.
///
/// A non-zero exit maps to [`GhError::CommandFailed`] with the captured
/// stderr. Stdin is closed; these tools are never interactive here.
pub(crate) fn run_capture(mut cmd: Command) -> Result<String> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(?cmd, "spawning");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| GhError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GhError::CommandFailed {
            program,
            status: output.status,
            stderr: excerpt(stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Deserialize a JSON payload captured from a subprocess, keeping the
/// payload head in the error for diagnosis.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    context: &'static str,
    payload: &str,
) -> Result<T> {
    serde_json::from_str(payload).map_err(|source| GhError::Parse {
        context,
        payload: excerpt(payload.trim()),
        source,
    })
}
