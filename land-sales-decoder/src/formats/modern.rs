//! Modern (sales data) dialect
//!
//! A `B` line opens a sale; any number of `C` lines (description fragments)
//! and `D` lines (purchaser/vendor roles) follow it. All three share the
//! correlation key in columns 1-4: district code, property id, sale counter,
//! file timestamp. `B` lines have 24 columns:
//!
//! `B; district; property id; sale counter; file datetime; property name;
//! unit; house; street; locality; post code; area; area type; contract date;
//! settlement date; price; zone; nature; primary purpose; strata lot;
//! component code; sale code; % interest; dealing number`

use super::{Layout, RawLine, Sale};
use crate::codes;
use crate::config::DecoderConfig;
use crate::sale_book::{ChildKind, CorrelationKey};
use crate::types::{DecoderError, Dialect, FileHeader, FileType, Result, SaleRecord};

/// Header with the file type column
const HEADER_FIELDS: usize = 6;
const SALE_FIELDS: usize = 24;

pub(crate) struct ModernLayout;

impl Layout for ModernLayout {
    const DIALECT: Dialect = Dialect::Modern;
    const FOOTER_TAGS: &'static [&'static str] = &["B", "C", "D"];

    fn header(&self, line: &RawLine<'_>, config: &DecoderConfig) -> Result<FileHeader> {
        let mut fields: Vec<&str> = line.fields.clone();
        if fields.len() == HEADER_FIELDS - 1 {
            fields.insert(1, config.placeholder_file_type.as_str());
        }
        if fields.len() != HEADER_FIELDS {
            return Err(DecoderError::InvalidHeader {
                line: line.number,
                fields: line.len(),
            });
        }
        Ok(FileHeader {
            file_type: fields[1].to_string(),
            district_code: fields[2].to_string(),
            download_datetime: fields[3].to_string(),
            submitter_id: fields[4].to_string(),
        })
    }

    fn sale(&self, line: &RawLine<'_>, _header: Option<&FileHeader>) -> Result<Sale> {
        line.expect_fields(SALE_FIELDS)?;

        let f = |i: usize| line.field(i).to_string();
        let record = SaleRecord {
            district_code: f(1),
            district_name: codes::district_name(line.field(1)),
            property_id: f(2),
            file_datetime: f(4),
            contract_date: f(13),
            settlement_date: f(14),
            property_name: f(5),
            property_unit_number: f(6),
            property_house_number: f(7),
            property_street_name: f(8),
            property_locality: f(9),
            property_post_code: f(10),
            area: f(11),
            area_type: codes::area_type(line.field(12)),
            dimensions: String::new(),
            purchase_price: f(15),
            zone_code: f(16),
            zone_name: codes::zone_name(line.field(16)),
            nature_property: codes::nature_property(line.field(17)),
            primary_purpose: f(18),
            strata_number: f(19),
            component_code: f(20),
            sale_code: f(21),
            interest_sale: f(22),
            dealing_number: f(23),
            property_description: String::new(),
            purchaser_vendor: String::new(),
            filetype: FileType::Sales,
        };

        Ok(Sale::Open(CorrelationKey::from_fields(&line.fields), record))
    }

    fn child_kind(&self, tag: &str) -> Option<ChildKind> {
        match tag {
            "C" => Some(ChildKind::Description),
            "D" => Some(ChildKind::Party),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALE: &str = "B;214;P1;1;T1;ACME TOWERS;5;12;HIGH ST;BLACKTOWN;2148;650.5;M;20200102;20200301;750000;R2;R;RESIDENCE;SP1234;;;100;AB123456;";

    #[test]
    fn test_header_with_file_type() {
        let line = RawLine::parse(1, "A;RTSALEDATA;214;20200106 01:03;VALNET;").unwrap();
        let header = ModernLayout.header(&line, &DecoderConfig::new()).unwrap();
        assert_eq!(header.file_type, "RTSALEDATA");
        assert_eq!(header.district_code, "214");
        assert_eq!(header.download_datetime, "20200106 01:03");
        assert_eq!(header.submitter_id, "VALNET");
    }

    #[test]
    fn test_header_without_file_type_is_repaired() {
        let line = RawLine::parse(1, "A;214;20200106 01:03;VALNET;").unwrap();
        let header = ModernLayout.header(&line, &DecoderConfig::new()).unwrap();
        assert_eq!(header.file_type, "NA");
        assert_eq!(header.district_code, "214");
        assert_eq!(header.submitter_id, "VALNET");
    }

    #[test]
    fn test_header_with_other_field_counts_is_invalid() {
        for text in ["A;214;VALNET", "A;X;214;20200106 01:03;VALNET;;"] {
            let line = RawLine::parse(4, text).unwrap();
            let err = ModernLayout.header(&line, &DecoderConfig::new()).unwrap_err();
            assert!(matches!(err, DecoderError::InvalidHeader { line: 4, .. }), "{}", text);
        }
    }

    #[test]
    fn test_sale_line() {
        let line = RawLine::parse(2, SALE).unwrap();
        let Sale::Open(key, record) = ModernLayout.sale(&line, None).unwrap() else {
            panic!("modern sales stay open for child lines");
        };

        assert_eq!(key, CorrelationKey::from_fields(&["C", "214", "P1", "1", "T1"]));
        assert_eq!(record.district_name, "BLACKTOWN");
        assert_eq!(record.file_datetime, "T1");
        assert_eq!(record.property_name, "ACME TOWERS");
        assert_eq!(record.area_type, "Square Meters");
        assert_eq!(record.contract_date, "20200102");
        assert_eq!(record.settlement_date, "20200301");
        assert_eq!(record.purchase_price, "750000");
        assert_eq!(record.zone_name, "Low Density Residential");
        assert_eq!(record.nature_property, "Residence");
        assert_eq!(record.strata_number, "SP1234");
        assert_eq!(record.interest_sale, "100");
        assert_eq!(record.dealing_number, "AB123456");
        assert_eq!(record.dimensions, "");
        assert_eq!(record.filetype, FileType::Sales);
    }

    #[test]
    fn test_truncated_sale_line() {
        let line = RawLine::parse(3, "B;214;P1;1;T1;NAME").unwrap();
        let err = ModernLayout.sale(&line, None).unwrap_err();
        assert!(matches!(err, DecoderError::MalformedLine { line: 3, expected: 24, .. }));
    }

    #[test]
    fn test_child_kinds() {
        assert_eq!(ModernLayout.child_kind("C"), Some(ChildKind::Description));
        assert_eq!(ModernLayout.child_kind("D"), Some(ChildKind::Party));
        assert_eq!(ModernLayout.child_kind("Q"), None);
    }
}
