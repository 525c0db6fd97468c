//! Decoder configuration types
//!
//! The decoder needs very little configuration: how to recognise each dialect
//! from a file name, and whether footer count mismatches should fail a file.

use serde::{Deserialize, Serialize};

/// Configuration for the decoder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Fail a file whose footer counts disagree with its contents
    /// (default: report the mismatch as a diagnostic and keep the records)
    #[serde(default)]
    pub strict_footer: bool,

    /// File name substring identifying the flat legacy dialect
    #[serde(default = "default_legacy_marker")]
    pub legacy_marker: String,

    /// File name substring identifying the multi-line modern dialect
    #[serde(default = "default_modern_marker")]
    pub modern_marker: String,

    /// Value inserted for the file type column when a modern header omits it
    #[serde(default = "default_placeholder")]
    pub placeholder_file_type: String,
}

fn default_legacy_marker() -> String {
    "ARCHIVE_SALES".to_string()
}

fn default_modern_marker() -> String {
    "SALES_DATA_NNME".to_string()
}

fn default_placeholder() -> String {
    "NA".to_string()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_footer: false,
            legacy_marker: default_legacy_marker(),
            modern_marker: default_modern_marker(),
            placeholder_file_type: default_placeholder(),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: hard-fail on footer count mismatches
    pub fn with_strict_footer(mut self, enabled: bool) -> Self {
        self.strict_footer = enabled;
        self
    }

    /// Builder method: set the legacy file name marker
    pub fn with_legacy_marker(mut self, marker: impl Into<String>) -> Self {
        self.legacy_marker = marker.into();
        self
    }

    /// Builder method: set the modern file name marker
    pub fn with_modern_marker(mut self, marker: impl Into<String>) -> Self {
        self.modern_marker = marker.into();
        self
    }
}
