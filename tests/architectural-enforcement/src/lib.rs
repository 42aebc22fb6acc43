//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The conductor core stays headless (no UI framework imports)
//! - The terminal surface stays a thin client (no transport or log handling)
//!
//! The helpers here locate workspace sources for the tests under `tests/`.

use std::path::{Path, PathBuf};

/// Root of the workspace
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Every `.rs` file below `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Lines of `path` containing any forbidden pattern, outside `//` comments
///
/// Returns `file:line - text` entries.
#[must_use]
pub fn find_violations(path: &Path, forbidden: &[&str]) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let code_part = line.split("//").next().unwrap_or(line);
            forbidden
                .iter()
                .any(|pattern| code_part.contains(pattern))
                .then(|| format!("{}:{} - {}", path.display(), idx + 1, line.trim()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_rust_files_finds_this_crate() {
        let files = rust_files("tests/architectural-enforcement/src");
        assert!(files.iter().any(|p| p.ends_with("lib.rs")));
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        assert!(rust_files("does/not/exist").is_empty());
    }
}
