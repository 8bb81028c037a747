//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "SALARY_STANDARDS_DIR";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `SALARY_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// The standards directory named by `SALARY_STANDARDS_DIR`, if set.
pub fn standards_root_from_env() -> Option<PathBuf> {
    std::env::var_os(STANDARDS_ENV_VAR).map(PathBuf::from)
}
