//! Core types for the land sales decoder library
//!
//! This module defines the normalized sale record the decoder emits, the
//! per-file metadata it reads along the way, and the error and diagnostic
//! types attached to every file it processes.

use crate::validate::StructuralReport;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Which decoder produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Flat single-line-per-sale files
    #[default]
    Archive,
    /// Multi-line-per-sale files
    Sales,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Archive => write!(f, "archive"),
            FileType::Sales => write!(f, "sales"),
        }
    }
}

/// One normalized property sale - the primary output of the decoder
///
/// Every field is present on every record regardless of which dialect it was
/// read from. Fields are declared in output column order; a `csv::Writer`
/// serializing these records emits the header row in that same order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SaleRecord {
    pub district_code: String,
    /// Council name resolved from `district_code`, empty when unknown
    pub district_name: String,
    pub property_id: String,
    pub file_datetime: String,
    pub contract_date: String,
    pub settlement_date: String,
    pub property_name: String,
    pub property_unit_number: String,
    pub property_house_number: String,
    pub property_street_name: String,
    pub property_locality: String,
    pub property_post_code: String,
    pub area: String,
    /// "Square Meters", "Hectares" or the raw code
    pub area_type: String,
    pub dimensions: String,
    pub purchase_price: String,
    pub zone_code: String,
    /// Zone name resolved from `zone_code`, the raw code when unknown
    pub zone_name: String,
    /// "Vacant", "Residence", "Other" or the raw code
    pub nature_property: String,
    pub primary_purpose: String,
    pub strata_number: String,
    pub component_code: String,
    pub sale_code: String,
    pub interest_sale: String,
    pub dealing_number: String,
    /// Concatenated description fragments
    pub property_description: String,
    /// Comma separated purchaser/vendor roles
    pub purchaser_vendor: String,
    pub filetype: FileType,
}

impl SaleRecord {
    /// Output column names, in serialization order
    pub const COLUMNS: [&'static str; 28] = [
        "district_code",
        "district_name",
        "property_id",
        "file_datetime",
        "contract_date",
        "settlement_date",
        "property_name",
        "property_unit_number",
        "property_house_number",
        "property_street_name",
        "property_locality",
        "property_post_code",
        "area",
        "area_type",
        "dimensions",
        "purchase_price",
        "zone_code",
        "zone_name",
        "nature_property",
        "primary_purpose",
        "strata_number",
        "component_code",
        "sale_code",
        "interest_sale",
        "dealing_number",
        "property_description",
        "purchaser_vendor",
        "filetype",
    ];

    /// Field values as text, aligned with [`SaleRecord::COLUMNS`]
    pub fn values(&self) -> [&str; 28] {
        [
            &self.district_code,
            &self.district_name,
            &self.property_id,
            &self.file_datetime,
            &self.contract_date,
            &self.settlement_date,
            &self.property_name,
            &self.property_unit_number,
            &self.property_house_number,
            &self.property_street_name,
            &self.property_locality,
            &self.property_post_code,
            &self.area,
            &self.area_type,
            &self.dimensions,
            &self.purchase_price,
            &self.zone_code,
            &self.zone_name,
            &self.nature_property,
            &self.primary_purpose,
            &self.strata_number,
            &self.component_code,
            &self.sale_code,
            &self.interest_sale,
            &self.dealing_number,
            &self.property_description,
            &self.purchaser_vendor,
            match self.filetype {
                FileType::Archive => "archive",
                FileType::Sales => "sales",
            },
        ]
    }
}

/// File leader (`A` line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// File or record type column ("NA" when the file omits it)
    pub file_type: String,
    pub district_code: String,
    pub download_datetime: String,
    pub submitter_id: String,
}

impl FileHeader {
    /// Parse the download timestamp, if it is in one of the published layouts
    pub fn downloaded_at(&self) -> Option<NaiveDateTime> {
        let raw = self.download_datetime.trim();
        ["%Y%m%d %H:%M", "%Y%m%d %H:%M:%S", "%Y%m%d%H%M%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}

/// File trailer (`Z` line) with the declared record counts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileFooter {
    pub total_records: u64,
    /// Declared count per record tag ("B", "C", "D")
    pub declared: BTreeMap<String, u64>,
}

/// Per-tag counts of the meaningful lines seen while decoding a file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordCounts {
    by_tag: BTreeMap<String, u64>,
}

impl RecordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tag: &str) {
        *self.by_tag.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, tag: &str) -> u64 {
        self.by_tag.get(tag).copied().unwrap_or(0)
    }

    /// Number of counted lines, footer excluded
    pub fn total(&self) -> u64 {
        self.by_tag
            .iter()
            .filter(|(tag, _)| tag.as_str() != "Z")
            .map(|(_, n)| n)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.by_tag.iter().map(|(tag, n)| (tag.as_str(), *n))
    }
}

/// The two known file layouts, plus everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Flat layout, one `B` line per sale
    Legacy,
    /// Multi-line layout, `B` opens a sale and `C`/`D` lines extend it
    Modern,
    /// Not a sale file (auxiliary files in the same directory)
    Unsupported,
}

impl Dialect {
    /// The provenance tag stamped on records of this dialect
    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Dialect::Legacy => Some(FileType::Archive),
            Dialect::Modern => Some(FileType::Sales),
            Dialect::Unsupported => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "legacy"),
            Dialect::Modern => write!(f, "modern"),
            Dialect::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Fatal errors - decoding of the offending file stops
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Sale record on line {line} appears before the file header")]
    MissingHeader { line: usize },

    #[error("Invalid file header on line {line}: expected 5 or 6 fields, found {fields}")]
    InvalidHeader { line: usize, fields: usize },

    #[error("Malformed '{tag}' record on line {line}: expected at least {expected} fields, found {found}")]
    MalformedLine {
        line: usize,
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("Footer counts disagree with the file contents: {0}")]
    StructuralMismatch(StructuralReport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal findings attached to a file's decode result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A `C`/`D` line whose key matches no open sale; the line was dropped
    OrphanChildLine {
        line: usize,
        tag: String,
        key: String,
        /// True when the key belonged to a sale that had already been finalized
        closed: bool,
    },
    /// Footer-declared counts disagree with the observed counts
    StructuralMismatch(StructuralReport),
    /// The file name matches neither dialect
    UnroutableFile { file: String },
    /// A second `A` line; the first header was kept
    DuplicateHeader { line: usize },
    /// The file ended without a `Z` line, so nothing was validated
    MissingFooter,
    /// A footer count that is not a number
    UnreadableFooter { line: usize, value: String },
    /// Lines after the footer, which were not decoded
    TrailingAfterFooter { lines: usize },
    /// Lines with a tag the dialect does not define
    UnknownTag { tag: String, lines: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OrphanChildLine { line, tag, key, closed } => {
                let state = if *closed { "already finalized" } else { "unknown" };
                write!(f, "line {}: orphan '{}' record for {} sale {}", line, tag, state, key)
            }
            Diagnostic::StructuralMismatch(report) => write!(f, "structural mismatch: {}", report),
            Diagnostic::UnroutableFile { file } => write!(f, "not a sale file: {}", file),
            Diagnostic::DuplicateHeader { line } => write!(f, "line {}: duplicate header ignored", line),
            Diagnostic::MissingFooter => write!(f, "no footer record, counts not validated"),
            Diagnostic::UnreadableFooter { line, value } => {
                write!(f, "line {}: footer count {:?} is not a number", line, value)
            }
            Diagnostic::TrailingAfterFooter { lines } => {
                write!(f, "{} line(s) after the footer ignored", lines)
            }
            Diagnostic::UnknownTag { tag, lines } => {
                write!(f, "{} line(s) with unknown tag {:?} ignored", lines, tag)
            }
        }
    }
}

/// Everything decoded from one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDecode {
    /// File name the dialect was chosen from
    pub file: String,
    pub dialect: Dialect,
    /// Fully finalized records in file order
    pub records: Vec<SaleRecord>,
    pub counts: RecordCounts,
    /// Footer validation, `None` when the file had no usable footer
    pub report: Option<StructuralReport>,
    pub diagnostics: Vec<Diagnostic>,
    /// Bytes consumed from the source
    pub bytes: u64,
}

impl FileDecode {
    /// Result for a file that was not decoded because no dialect matched
    pub fn unroutable(file: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            diagnostics: vec![Diagnostic::UnroutableFile { file: file.clone() }],
            file,
            dialect: Dialect::Unsupported,
            records: Vec::new(),
            counts: RecordCounts::new(),
            report: None,
            bytes: 0,
        }
    }

    /// Everything except the records
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            file: self.file.clone(),
            dialect: self.dialect,
            records: self.records.len(),
            bytes: self.bytes,
            counts: self.counts.clone(),
            report: self.report.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// Record-free view of a [`FileDecode`], handed to progress observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub dialect: Dialect,
    pub records: usize,
    pub bytes: u64,
    pub counts: RecordCounts,
    pub report: Option<StructuralReport>,
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_match_serialized_order() {
        let record = SaleRecord {
            district_code: "214".to_string(),
            filetype: FileType::Sales,
            ..Default::default()
        };
        let values = record.values();
        assert_eq!(values.len(), SaleRecord::COLUMNS.len());
        assert_eq!(values[0], "214");
        assert_eq!(values[27], "sales");
        assert_eq!(SaleRecord::COLUMNS[27], "filetype");
    }

    #[test]
    fn test_record_counts_exclude_footer_from_total() {
        let mut counts = RecordCounts::new();
        for tag in ["A", "B", "B", "C", "Z"] {
            counts.record(tag);
        }
        assert_eq!(counts.get("B"), 2);
        assert_eq!(counts.get("D"), 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_header_timestamp_parsing() {
        let header = FileHeader {
            file_type: "RTSALEDATA".to_string(),
            district_code: "214".to_string(),
            download_datetime: "20200106 01:03".to_string(),
            submitter_id: "VALNET".to_string(),
        };
        let at = header.downloaded_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), "2020-01-06 01:03");

        let odd = FileHeader {
            download_datetime: "sometime".to_string(),
            ..header
        };
        assert!(odd.downloaded_at().is_none());
    }

    #[test]
    fn test_dialect_file_type() {
        assert_eq!(Dialect::Legacy.file_type(), Some(FileType::Archive));
        assert_eq!(Dialect::Modern.file_type(), Some(FileType::Sales));
        assert_eq!(Dialect::Unsupported.file_type(), None);
        assert_eq!(FileType::Archive.to_string(), "archive");
    }
}
