use featops_core::spec::SPEC_FILE;
use std::path::{Path, PathBuf};

/// Resolve the spec file path.
///
/// Priority:
/// 1. `--spec` flag / `FEATOPS_SPEC` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `featops.yaml`
/// 3. Fall back to `cwd/featops.yaml`
pub fn resolve_spec(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        let candidate = dir.join(SPEC_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd.join(SPEC_FILE)
}

/// The project root every relative path is resolved against: the directory
/// holding the spec file.
pub fn project_root(spec_path: &Path) -> &Path {
    spec_path.parent().unwrap_or(Path::new("."))
}
