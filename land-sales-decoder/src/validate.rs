//! Structural validation against the footer
//!
//! Compares what a file actually contained with what its `Z` line declares.
//! Only the totals a footer declares are checked.

use crate::types::{FileFooter, RecordCounts};
use serde::Serialize;
use std::fmt;

/// Which count a check refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountScope {
    /// All counted lines, footer excluded
    Total,
    /// Lines of one record tag
    Tag(String),
}

impl fmt::Display for CountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountScope::Total => write!(f, "total_records"),
            CountScope::Tag(tag) => write!(f, "total_{}_records", tag),
        }
    }
}

/// One declared-versus-observed comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountCheck {
    pub scope: CountScope,
    pub declared: u64,
    pub observed: u64,
}

impl CountCheck {
    pub fn matches(&self) -> bool {
        self.declared == self.observed
    }
}

/// Outcome of validating one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralReport {
    pub checks: Vec<CountCheck>,
}

impl StructuralReport {
    pub fn is_consistent(&self) -> bool {
        self.checks.iter().all(CountCheck::matches)
    }

    /// The checks that failed
    pub fn mismatches(&self) -> impl Iterator<Item = &CountCheck> {
        self.checks.iter().filter(|c| !c.matches())
    }
}

impl fmt::Display for StructuralReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for check in self.mismatches() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{} declared={} observed={}", check.scope, check.declared, check.observed)?;
        }
        if first {
            write!(f, "consistent")?;
        }
        Ok(())
    }
}

/// Compare observed counts with a footer
pub fn validate(counts: &RecordCounts, footer: &FileFooter) -> StructuralReport {
    let mut checks = vec![CountCheck {
        scope: CountScope::Total,
        declared: footer.total_records,
        observed: counts.total(),
    }];

    checks.extend(footer.declared.iter().map(|(tag, declared)| CountCheck {
        scope: CountScope::Tag(tag.clone()),
        declared: *declared,
        observed: counts.get(tag),
    }));

    StructuralReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn counts(tags: &[&str]) -> RecordCounts {
        let mut counts = RecordCounts::new();
        for tag in tags {
            counts.record(tag);
        }
        counts
    }

    #[test]
    fn test_consistent_file() {
        let footer = FileFooter {
            total_records: 4,
            declared: BTreeMap::from([("B".to_string(), 2), ("C".to_string(), 1)]),
        };
        let report = validate(&counts(&["A", "B", "C", "B", "Z"]), &footer);
        assert!(report.is_consistent());
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.to_string(), "consistent");
    }

    #[test]
    fn test_missing_sale_line_is_reported() {
        let footer = FileFooter {
            total_records: 6,
            declared: BTreeMap::from([("B".to_string(), 5)]),
        };
        let report = validate(&counts(&["A", "B", "B", "B", "B", "Z"]), &footer);
        assert!(!report.is_consistent());

        let b = report
            .mismatches()
            .find(|c| c.scope == CountScope::Tag("B".to_string()))
            .unwrap();
        assert_eq!(b.declared, 5);
        assert_eq!(b.observed, 4);
        assert!(report.to_string().contains("total_B_records declared=5 observed=4"));
    }
}
