//! Sale correlation and accumulation
//!
//! The book owns every record decoded from one file. At most one sale is open
//! at a time; child lines extend it through its correlation key, and it is
//! finalized (its multi-valued fields collapsed to text) when the next sale
//! opens or the book is closed at end of file. Open sales are tracked by index
//! into the record list, so nothing is aliased.

use crate::codes;
use crate::types::SaleRecord;
use std::collections::HashMap;
use std::fmt;

/// Identifies the sale a child line belongs to: district code, property id,
/// sale counter and file timestamp, as written on the line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    pub district_code: String,
    pub property_id: String,
    pub sale_counter: String,
    pub file_datetime: String,
}

impl CorrelationKey {
    /// Build a key from columns 1 to 4 of a split line
    pub fn from_fields(fields: &[&str]) -> Self {
        let at = |i: usize| fields.get(i).copied().unwrap_or("").to_string();
        Self {
            district_code: at(1),
            property_id: at(2),
            sale_counter: at(3),
            file_datetime: at(4),
        }
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.district_code, self.property_id, self.sale_counter, self.file_datetime
        )
    }
}

/// The multi-valued fields child lines contribute to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// `C` line: one fragment of the property description
    Description,
    /// `D` line: one purchaser or vendor role
    Party,
}

/// What happened to a child line handed to the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    Attached,
    /// No sale with this key was opened in this file
    Unknown,
    /// The sale exists but was finalized when a later sale opened
    Closed,
}

#[derive(Debug)]
struct OpenSale {
    index: usize,
    key: CorrelationKey,
    description: Vec<String>,
    parties: Vec<String>,
}

/// Records of one file, in first-seen order
#[derive(Debug, Default)]
pub struct SaleBook {
    records: Vec<SaleRecord>,
    keys: HashMap<CorrelationKey, usize>,
    open: Option<OpenSale>,
}

impl SaleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record that needs no further lines
    pub fn push_complete(&mut self, record: SaleRecord) {
        self.finalize_open();
        self.records.push(record);
    }

    /// Finalize the open sale, then open `record` under `key`
    pub fn open(&mut self, key: CorrelationKey, record: SaleRecord) {
        self.finalize_open();
        let index = self.records.len();
        self.records.push(record);
        self.keys.insert(key.clone(), index);
        self.open = Some(OpenSale {
            index,
            key,
            description: Vec::new(),
            parties: Vec::new(),
        });
    }

    /// Whether a child line with this key would be accepted
    pub fn lookup(&self, key: &CorrelationKey) -> Attach {
        match &self.open {
            Some(open) if open.key == *key => Attach::Attached,
            _ if self.keys.contains_key(key) => Attach::Closed,
            _ => Attach::Unknown,
        }
    }

    /// Add a child value to the open sale with this key
    pub fn attach(&mut self, key: &CorrelationKey, kind: ChildKind, raw: &str) -> Attach {
        if let Some(open) = self.open.as_mut().filter(|open| open.key == *key) {
            match kind {
                ChildKind::Description => open.description.push(raw.to_string()),
                ChildKind::Party => open.parties.push(codes::party_role(raw)),
            }
            return Attach::Attached;
        }
        self.lookup(key)
    }

    fn finalize_open(&mut self) {
        if let Some(open) = self.open.take() {
            let record = &mut self.records[open.index];
            record.property_description = open.description.concat();
            record.purchaser_vendor = open.parties.join(", ");
            log::trace!("Finalized sale {} at index {}", open.key, open.index);
        }
    }

    /// Finalize the last open sale and hand over every record
    pub fn close(mut self) -> Vec<SaleRecord> {
        self.finalize_open();
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> CorrelationKey {
        CorrelationKey::from_fields(&["B", "214", id, "1", "T1"])
    }

    fn record(id: &str) -> SaleRecord {
        SaleRecord {
            property_id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_children_collapse_when_next_sale_opens() {
        let mut book = SaleBook::new();
        book.open(key("P1"), record("P1"));
        assert_eq!(book.attach(&key("P1"), ChildKind::Description, "frag1"), Attach::Attached);
        assert_eq!(book.attach(&key("P1"), ChildKind::Description, "frag2"), Attach::Attached);
        assert_eq!(book.attach(&key("P1"), ChildKind::Party, "P"), Attach::Attached);
        book.open(key("P2"), record("P2"));

        let records = book.close();
        assert_eq!(records[0].property_description, "frag1frag2");
        assert_eq!(records[0].purchaser_vendor, "Purchaser");
        assert_eq!(records[1].property_description, "");
    }

    #[test]
    fn test_close_finalizes_last_sale() {
        let mut book = SaleBook::new();
        book.open(key("P1"), record("P1"));
        book.attach(&key("P1"), ChildKind::Party, "P");
        book.attach(&key("P1"), ChildKind::Party, "V");
        book.attach(&key("P1"), ChildKind::Party, "X");

        let records = book.close();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].purchaser_vendor, "Purchaser, Vendor, X");
    }

    #[test]
    fn test_unknown_and_closed_keys() {
        let mut book = SaleBook::new();
        assert_eq!(book.attach(&key("P1"), ChildKind::Description, "x"), Attach::Unknown);

        book.open(key("P1"), record("P1"));
        book.open(key("P2"), record("P2"));
        assert_eq!(book.attach(&key("P1"), ChildKind::Description, "late"), Attach::Closed);
        assert_eq!(book.lookup(&key("P3")), Attach::Unknown);

        let records = book.close();
        assert_eq!(records[0].property_description, "");
    }

    #[test]
    fn test_key_differing_in_any_column_does_not_match() {
        let mut book = SaleBook::new();
        let opened = CorrelationKey::from_fields(&["B", "214", "P1", "1", "T1"]);
        book.open(opened, record("P1"));

        let other_counter = CorrelationKey::from_fields(&["C", "214", "P1", "2", "T1"]);
        let other_time = CorrelationKey::from_fields(&["C", "214", "P1", "1", "T2"]);
        assert_eq!(book.lookup(&other_counter), Attach::Unknown);
        assert_eq!(book.lookup(&other_time), Attach::Unknown);
    }

    #[test]
    fn test_push_complete_keeps_order() {
        let mut book = SaleBook::new();
        book.push_complete(record("A1"));
        book.push_complete(record("A2"));
        let ids: Vec<_> = book.close().into_iter().map(|r| r.property_id).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }
}
