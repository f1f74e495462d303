//! Drug database path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the drug database location.
pub const DB_ENV_VAR: &str = "PKHELPER_DB";

/// Get the drug database path.
///
/// Resolution order:
/// 1. `PKHELPER_DB` environment variable
/// 2. `data/medicamentos.json` relative to workspace root
pub fn default_database_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        return PathBuf::from(path);
    }
    bundled_database_path()
}

/// The sample database shipped at the workspace root.
pub fn bundled_database_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/medicamentos.json")
}
