//! CSV serialization of sale records

use anyhow::{Context, Result};
use land_sales_decoder::SaleRecord;
use std::io::Write;
use std::path::Path;

/// Write `records` as CSV with a header row; returns the number of rows
pub fn write_csv_to<W: Write>(writer: W, records: &[SaleRecord]) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(SaleRecord::COLUMNS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(records.len())
}

pub fn write_csv(path: &Path, records: &[SaleRecord]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;
    write_csv_to(std::io::BufWriter::new(file), records)
        .with_context(|| format!("Failed to write CSV file: {:?}", path))
}
