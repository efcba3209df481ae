//! `gh-client` — typed wrappers over the `gh` and `git` command-line tools.
//!
//! All interaction with the issue tracker and the version-control system
//! goes through these two external binaries, invoked as subprocesses with
//! captured stdout/stderr. This crate owns that boundary: argv
//! construction, exit-status mapping, and deserialization of `--json`
//! output onto plain records.
//!
//! ```text
//! Gh / Git        ← argv builders, one subprocess per method call
//!     │
//!     ▼
//! process::run_capture   ← spawn, wait, capture, map non-zero exit
//!     │
//!     ▼
//! types::{Issue, PullRequest}   ← serde records from `--json` payloads
//! ```
//!
//! Calls are synchronous and sequential; the callers decide how to pace
//! them (e.g. the batch trigger sleeps between comments).

pub mod error;
pub mod gh;
pub mod git;
pub mod types;

pub(crate) mod process;

pub use error::{GhError, Result};
pub use gh::Gh;
pub use git::Git;
pub use types::{Issue, Label, PullRequest};
