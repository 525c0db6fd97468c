//! Per-file line loop shared by both dialects
//!
//! Lines are processed strictly in order: each meaningful line is counted
//! under its tag, then dispatched to the dialect layout. Child lines are
//! correlated through the [`SaleBook`]; the footer ends decoding. After the
//! loop the last open sale is finalized and counts are validated against the
//! footer.

use crate::config::DecoderConfig;
use crate::formats::{Layout, RawLine, Sale, CHILD_VALUE_COLUMN};
use crate::sale_book::{Attach, CorrelationKey, SaleBook};
use crate::types::{DecoderError, Diagnostic, FileDecode, FileFooter, FileHeader, RecordCounts, Result};
use crate::validate;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Decode every line of `reader` with `layout`
pub(crate) fn decode_lines<L: Layout, R: BufRead>(
    layout: &L,
    file: &str,
    mut reader: R,
    config: &DecoderConfig,
) -> Result<FileDecode> {
    let mut counts = RecordCounts::new();
    let mut book = SaleBook::new();
    let mut diagnostics = Vec::new();
    let mut header: Option<FileHeader> = None;
    let mut footer: Option<FileFooter> = None;
    let mut footer_seen = false;
    let mut trailing = 0usize;
    let mut unknown: BTreeMap<String, u64> = BTreeMap::new();

    let mut buf = Vec::new();
    let mut number = 0usize;
    let mut bytes = 0u64;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        bytes += read as u64;
        number += 1;

        let text = String::from_utf8_lossy(&buf);
        let Some(line) = RawLine::parse(number, &text) else {
            continue;
        };
        if footer_seen {
            trailing += 1;
            continue;
        }

        counts.record(line.tag());
        match line.tag() {
            "A" => {
                if header.is_some() {
                    diagnostics.push(Diagnostic::DuplicateHeader { line: number });
                    continue;
                }
                let parsed = layout.header(&line, config)?;
                log::debug!(
                    "{}: header district={} type={} downloaded={}",
                    file,
                    parsed.district_code,
                    parsed.file_type,
                    parsed
                        .downloaded_at()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| parsed.download_datetime.clone())
                );
                header = Some(parsed);
            }
            "B" => match layout.sale(&line, header.as_ref())? {
                Sale::Complete(record) => book.push_complete(record),
                Sale::Open(key, record) => {
                    log::trace!("{}:{}: opened sale {}", file, number, key);
                    book.open(key, record);
                }
            },
            "Z" => {
                footer_seen = true;
                match layout.footer(&line) {
                    Ok(parsed) => footer = Some(parsed),
                    Err(diagnostic) => diagnostics.push(diagnostic),
                }
            }
            tag => match layout.child_kind(tag) {
                Some(kind) => {
                    let key = CorrelationKey::from_fields(&line.fields);
                    match book.lookup(&key) {
                        Attach::Attached => {
                            line.expect_fields(CHILD_VALUE_COLUMN + 1)?;
                            book.attach(&key, kind, line.field(CHILD_VALUE_COLUMN));
                        }
                        missing => {
                            log::trace!("{}:{}: orphan '{}' line for {}", file, number, tag, key);
                            diagnostics.push(Diagnostic::OrphanChildLine {
                                line: number,
                                tag: tag.to_string(),
                                key: key.to_string(),
                                closed: missing == Attach::Closed,
                            });
                        }
                    }
                }
                None => {
                    log::trace!("{}:{}: ignoring '{}' line", file, number, tag);
                    *unknown.entry(tag.to_string()).or_insert(0) += 1;
                }
            },
        }
    }

    let records = book.close();

    if trailing > 0 {
        diagnostics.push(Diagnostic::TrailingAfterFooter { lines: trailing });
    }
    diagnostics.extend(
        unknown
            .into_iter()
            .map(|(tag, lines)| Diagnostic::UnknownTag { tag, lines }),
    );

    let report = footer.as_ref().map(|f| validate::validate(&counts, f));
    match &report {
        Some(report) if !report.is_consistent() => {
            if config.strict_footer {
                return Err(DecoderError::StructuralMismatch(report.clone()));
            }
            diagnostics.push(Diagnostic::StructuralMismatch(report.clone()));
        }
        Some(_) => {}
        None if !footer_seen => diagnostics.push(Diagnostic::MissingFooter),
        None => {}
    }

    for diagnostic in &diagnostics {
        log::warn!("{}: {}", file, diagnostic);
    }
    log::info!(
        "{}: decoded {} {} sale(s) from {} line(s)",
        file,
        records.len(),
        L::DIALECT,
        number
    );

    Ok(FileDecode {
        file: file.to_string(),
        dialect: L::DIALECT,
        records,
        counts,
        report,
        diagnostics,
        bytes,
    })
}
