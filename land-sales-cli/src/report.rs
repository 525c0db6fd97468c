//! Run manifest and JSON report
//!
//! The manifest is a plain list of every file the run read or wrote. The
//! JSON report carries the per-file summaries (counts, footer validation,
//! diagnostics) and the failures.

use anyhow::{Context, Result};
use land_sales_decoder::{FileFailure, FileSummary};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the manifest: a title line with the run time, then one path per line
pub fn write_manifest(path: &Path, when: &str, entries: &[PathBuf]) -> Result<()> {
    let mut text = format!("NSW Land Data Manifest (as of {})\n\n", when);
    for entry in entries {
        text.push_str(&entry.display().to_string());
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("Failed to write manifest: {:?}", path))
}

#[derive(Debug, Serialize)]
pub struct FailureEntry {
    pub file: String,
    pub error: String,
}

impl From<&FileFailure> for FailureEntry {
    fn from(failure: &FileFailure) -> Self {
        Self {
            file: failure.file.clone(),
            error: failure.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: &'a str,
    pub records: usize,
    pub files: &'a [FileSummary],
    pub failures: Vec<FailureEntry>,
}

impl<'a> RunReport<'a> {
    pub fn new(
        generated_at: &'a str,
        records: usize,
        files: &'a [FileSummary],
        failures: &[FileFailure],
    ) -> Self {
        Self {
            generated_at,
            records,
            files,
            failures: failures.iter().map(FailureEntry::from).collect(),
        }
    }
}

pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))
}
