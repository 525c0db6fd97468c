//! Static code lookup tables
//!
//! Maps the short codes found in sale records to readable names. Tables are
//! built once on first use and only ever read afterwards, so decoders running
//! on different threads share them without synchronization.
//!
//! What an unknown code resolves to differs per field and is spelled out in
//! [`CodedField::fallback`]: district names fall back to empty text, all other
//! coded fields pass the raw code through.

mod districts;
mod zones;

use std::collections::HashMap;
use std::sync::LazyLock;

/// What to emit when a code is not in its table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Emit the code exactly as it appeared in the file
    Passthrough,
    /// Emit empty text
    Empty,
}

/// A field whose value is resolved through a lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodedField {
    DistrictName,
    ZoneName,
    AreaType,
    NatureProperty,
    PurchaserVendor,
}

impl CodedField {
    pub const ALL: [CodedField; 5] = [
        CodedField::DistrictName,
        CodedField::ZoneName,
        CodedField::AreaType,
        CodedField::NatureProperty,
        CodedField::PurchaserVendor,
    ];

    /// Per-field fallback policy
    pub fn fallback(self) -> Fallback {
        match self {
            CodedField::DistrictName => Fallback::Empty,
            CodedField::ZoneName
            | CodedField::AreaType
            | CodedField::NatureProperty
            | CodedField::PurchaserVendor => Fallback::Passthrough,
        }
    }

    fn table(self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            CodedField::DistrictName => &DISTRICT_TABLE,
            CodedField::ZoneName => &ZONE_TABLE,
            CodedField::AreaType => &AREA_TYPE_TABLE,
            CodedField::NatureProperty => &NATURE_TABLE,
            CodedField::PurchaserVendor => &PARTY_TABLE,
        }
    }

    /// Look a code up without applying the fallback
    pub fn name_of(self, code: &str) -> Option<&'static str> {
        self.table().get(code.trim()).copied()
    }

    /// Resolve a code to its name, applying this field's fallback
    pub fn resolve(self, code: &str) -> String {
        match self.name_of(code) {
            Some(name) => name.to_string(),
            None => match self.fallback() {
                Fallback::Passthrough => code.to_string(),
                Fallback::Empty => String::new(),
            },
        }
    }

    /// Number of known codes for this field
    pub fn len(self) -> usize {
        self.table().len()
    }
}

static DISTRICT_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| districts::DISTRICTS.iter().copied().collect());

static ZONE_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| zones::ZONES.iter().copied().collect());

static AREA_TYPE_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("M", "Square Meters"), ("H", "Hectares")]));

static NATURE_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("V", "Vacant"), ("R", "Residence"), ("3", "Other")]));

static PARTY_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("P", "Purchaser"), ("V", "Vendor")]));

pub fn district_name(code: &str) -> String {
    CodedField::DistrictName.resolve(code)
}

pub fn zone_name(code: &str) -> String {
    CodedField::ZoneName.resolve(code)
}

pub fn area_type(code: &str) -> String {
    CodedField::AreaType.resolve(code)
}

pub fn nature_property(code: &str) -> String {
    CodedField::NatureProperty.resolve(code)
}

pub fn party_role(code: &str) -> String {
    CodedField::PurchaserVendor.resolve(code)
}
