//! Line layouts of the two sale file dialects
//!
//! Both dialects are semicolon separated text with a one character record
//! tag in the first column: `A` header, `B` sale, `Z` footer. The modern
//! dialect adds `C` (description fragment) and `D` (purchaser/vendor) lines
//! that extend the sale opened by the preceding `B` line. Each layout only
//! knows how to turn single lines into values; the line loop, correlation and
//! validation are shared (see `file_decoder`).

use crate::config::DecoderConfig;
use crate::sale_book::{ChildKind, CorrelationKey};
use crate::types::{DecoderError, Diagnostic, Dialect, FileFooter, FileHeader, Result, SaleRecord};
use std::collections::BTreeMap;

pub mod legacy;
pub mod modern;

pub(crate) use legacy::LegacyLayout;
pub(crate) use modern::ModernLayout;

/// Column holding the value of a `C` or `D` line
pub(crate) const CHILD_VALUE_COLUMN: usize = 5;

/// One meaningful input line, split on `;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    /// 1-based physical line number
    pub number: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Split a line, or `None` for blank lines and lines made only of
    /// delimiters (truncated trailing records)
    pub fn parse(number: usize, text: &'a str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.chars().all(|c| c == ';') {
            return None;
        }
        Some(Self {
            number,
            fields: text.split(';').collect(),
        })
    }

    pub fn tag(&self) -> &'a str {
        self.fields[0]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Field `index`, empty when the line is shorter
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    pub fn expect_fields(&self, expected: usize) -> Result<()> {
        if self.len() < expected {
            return Err(DecoderError::MalformedLine {
                line: self.number,
                tag: self.tag().to_string(),
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }
}

/// A decoded `B` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sale {
    /// The line is the whole sale
    Complete(SaleRecord),
    /// Later lines with this key may extend the sale
    Open(CorrelationKey, SaleRecord),
}

/// Per-dialect line decoding
pub(crate) trait Layout {
    const DIALECT: Dialect;

    /// Tags whose counts the footer declares after the overall total, in order
    const FOOTER_TAGS: &'static [&'static str];

    fn header(&self, line: &RawLine<'_>, config: &DecoderConfig) -> Result<FileHeader>;

    fn sale(&self, line: &RawLine<'_>, header: Option<&FileHeader>) -> Result<Sale>;

    /// Child line kinds this dialect defines
    fn child_kind(&self, _tag: &str) -> Option<ChildKind> {
        None
    }

    fn footer(&self, line: &RawLine<'_>) -> std::result::Result<FileFooter, Diagnostic> {
        parse_footer(line, Self::FOOTER_TAGS)
    }
}

fn parse_footer(line: &RawLine<'_>, tags: &[&str]) -> std::result::Result<FileFooter, Diagnostic> {
    let count = |raw: &str| {
        raw.trim().parse::<u64>().map_err(|_| Diagnostic::UnreadableFooter {
            line: line.number,
            value: raw.to_string(),
        })
    };

    let total_records = count(line.field(1))?;
    let mut declared = BTreeMap::new();
    for (offset, tag) in tags.iter().enumerate() {
        let raw = line.field(offset + 2);
        if raw.trim().is_empty() {
            continue;
        }
        declared.insert(tag.to_string(), count(raw)?);
    }

    Ok(FileFooter {
        total_records,
        declared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_delimiter_only_lines_are_skipped() {
        assert!(RawLine::parse(1, "").is_none());
        assert!(RawLine::parse(1, "   \r\n").is_none());
        assert!(RawLine::parse(1, ";;;;").is_none());
        assert!(RawLine::parse(1, " ;; \n").is_none());
    }

    #[test]
    fn test_line_fields() {
        let line = RawLine::parse(7, "C;214;P1;1;T1;frag1;\r\n").unwrap();
        assert_eq!(line.tag(), "C");
        assert_eq!(line.len(), 7);
        assert_eq!(line.field(5), "frag1");
        assert_eq!(line.field(40), "");
        assert!(line.expect_fields(6).is_ok());

        let err = line.expect_fields(24).unwrap_err();
        assert!(matches!(
            err,
            DecoderError::MalformedLine { line: 7, expected: 24, found: 7, .. }
        ));
    }

    #[test]
    fn test_footer_parsing() {
        let line = RawLine::parse(9, "Z;12;5;4;2;").unwrap();
        let footer = parse_footer(&line, &["B", "C", "D"]).unwrap();
        assert_eq!(footer.total_records, 12);
        assert_eq!(footer.declared.get("B"), Some(&5));
        assert_eq!(footer.declared.get("D"), Some(&2));

        let short = RawLine::parse(3, "Z;4;2").unwrap();
        let footer = parse_footer(&short, &["B", "C", "D"]).unwrap();
        assert_eq!(footer.declared.len(), 1);

        let bad = RawLine::parse(3, "Z;four;2").unwrap();
        assert_eq!(
            parse_footer(&bad, &["B"]),
            Err(Diagnostic::UnreadableFooter {
                line: 3,
                value: "four".to_string()
            })
        );
    }
}
