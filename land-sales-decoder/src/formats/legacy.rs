//! Legacy (archive) dialect
//!
//! One `B` line per sale, 18 columns:
//!
//! | # | column          | # | column         |
//! |---|-----------------|---|----------------|
//! | 1 | district code   | 10| contract date  |
//! | 2 | source          | 11| purchase price |
//! | 3 | valuation no.   | 12| description    |
//! | 4 | property id     | 13| area           |
//! | 5 | unit number     | 14| area type      |
//! | 6 | house number    | 15| dimensions     |
//! | 7 | street name     | 16| component code |
//! | 8 | locality        | 17| zone code      |
//! | 9 | post code       |   |                |
//!
//! Sale lines carry no timestamp of their own; they take the header's.

use super::{Layout, RawLine, Sale};
use crate::codes;
use crate::config::DecoderConfig;
use crate::types::{DecoderError, Dialect, FileHeader, FileType, Result, SaleRecord};

const HEADER_FIELDS: usize = 5;
const SALE_FIELDS: usize = 18;

pub(crate) struct LegacyLayout;

impl Layout for LegacyLayout {
    const DIALECT: Dialect = Dialect::Legacy;
    const FOOTER_TAGS: &'static [&'static str] = &["B"];

    fn header(&self, line: &RawLine<'_>, _config: &DecoderConfig) -> Result<FileHeader> {
        if line.len() < HEADER_FIELDS {
            return Err(DecoderError::InvalidHeader {
                line: line.number,
                fields: line.len(),
            });
        }
        Ok(FileHeader {
            file_type: line.field(2).to_string(),
            district_code: line.field(1).to_string(),
            download_datetime: line.field(3).to_string(),
            submitter_id: line.field(4).to_string(),
        })
    }

    fn sale(&self, line: &RawLine<'_>, header: Option<&FileHeader>) -> Result<Sale> {
        let header = header.ok_or(DecoderError::MissingHeader { line: line.number })?;
        line.expect_fields(SALE_FIELDS)?;

        let f = |i: usize| line.field(i).to_string();
        let contract_date = reverse_date(line.field(10));

        Ok(Sale::Complete(SaleRecord {
            district_code: f(1),
            district_name: codes::district_name(line.field(1)),
            property_id: f(4),
            file_datetime: header.download_datetime.clone(),
            settlement_date: contract_date.clone(),
            contract_date,
            property_name: String::new(),
            property_unit_number: f(5),
            property_house_number: f(6),
            property_street_name: f(7),
            property_locality: f(8),
            property_post_code: f(9),
            area: f(13),
            area_type: codes::area_type(line.field(14)),
            dimensions: f(15),
            purchase_price: f(11),
            zone_code: f(17),
            zone_name: codes::zone_name(line.field(17)),
            nature_property: String::new(),
            primary_purpose: String::new(),
            strata_number: String::new(),
            component_code: f(16),
            sale_code: String::new(),
            interest_sale: String::new(),
            dealing_number: String::new(),
            property_description: f(12),
            purchaser_vendor: String::new(),
            filetype: FileType::Archive,
        }))
    }
}

/// Reverse the `/`-separated segments of a date and join them:
/// `DD/MM/YYYY` becomes `YYYYMMDD`. Purely textual, no calendar checks.
pub(crate) fn reverse_date(raw: &str) -> String {
    raw.split('/').rev().collect()
}
