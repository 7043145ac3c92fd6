//! Runtime configuration
//!
//! Settings come from the environment:
//! - `BAKERSCALE_DATABASE_PATH`: SQLite file for saved recipes
//! - `RUST_LOG`: tracing filter

use std::path::PathBuf;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "BAKERSCALE_DATABASE_PATH";

/// Database file name used under `<project root>/data`
pub const DEFAULT_DATABASE_FILE: &str = "bakerscale.db";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

/// `<project root>/data/bakerscale.db`, where the project root is the
/// executable's directory with any trailing `target/{debug,release}` removed
pub fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(exe_dir);
    path.push("data");
    path.push(DEFAULT_DATABASE_FILE);
    path
}

fn project_root(mut path: PathBuf) -> PathBuf {
    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_leaves_target_dir() {
        assert_eq!(
            project_root(PathBuf::from("/work/bakerscale/target/release")),
            PathBuf::from("/work/bakerscale")
        );
        assert_eq!(
            project_root(PathBuf::from("/work/bakerscale/target/debug")),
            PathBuf::from("/work/bakerscale")
        );
        assert_eq!(
            project_root(PathBuf::from("/usr/local/bin")),
            PathBuf::from("/usr/local/bin")
        );
    }

    #[test]
    fn test_default_database_path_file_name() {
        let path = default_database_path();
        assert!(path.ends_with("data/bakerscale.db"));
    }
}
