//! Data directory scanning

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files directly inside `dir` with the given extension (case-insensitive),
/// sorted by path
pub fn scan_data_dir(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory: {:?}", dir))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list data directory: {:?}", dir))?
            .path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    log::debug!("Found {} .{} file(s) in {:?}", paths.len(), extension, dir);
    Ok(paths)
}
