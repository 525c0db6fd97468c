//! Stream assembly across files
//!
//! Flattens the records of many files into one sequence in file order. A file
//! that fails to decode is set aside as a [`FileFailure`] and the remaining
//! files are still decoded.

use crate::decoder::Decoder;
use crate::types::{DecoderError, FileDecode, FileSummary, SaleRecord};
use std::path::PathBuf;

/// Observer notified as each file finishes
pub trait Progress {
    fn on_file(&mut self, summary: &FileSummary);

    fn on_failure(&mut self, _failure: &FileFailure) {}
}

/// Progress observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn on_file(&mut self, _summary: &FileSummary) {}
}

/// A file whose decode failed, with its identity preserved
#[derive(Debug, thiserror::Error)]
#[error("{file}: {error}")]
pub struct FileFailure {
    pub file: String,
    #[source]
    pub error: DecoderError,
}

/// Lazily decodes files one after the other, yielding their records
///
/// # Example
/// ```no_run
/// use land_sales_decoder::{Decoder, NoProgress, SaleStream};
/// use std::path::PathBuf;
///
/// let decoder = Decoder::default();
/// let paths = vec![PathBuf::from("data/ARCHIVE_SALES_1990_0.DAT")];
/// let mut stream = SaleStream::new(&decoder, paths, NoProgress);
/// for record in stream.by_ref() {
///     println!("{} {}", record.district_name, record.purchase_price);
/// }
/// for failure in stream.failures() {
///     eprintln!("{}", failure);
/// }
/// ```
pub struct SaleStream<'a, P: Progress> {
    decoder: &'a Decoder,
    paths: std::vec::IntoIter<PathBuf>,
    pending: std::vec::IntoIter<SaleRecord>,
    summaries: Vec<FileSummary>,
    failures: Vec<FileFailure>,
    progress: P,
}

impl<'a, P: Progress> SaleStream<'a, P> {
    pub fn new(decoder: &'a Decoder, paths: Vec<PathBuf>, progress: P) -> Self {
        Self {
            decoder,
            paths: paths.into_iter(),
            pending: Vec::new().into_iter(),
            summaries: Vec::new(),
            failures: Vec::new(),
            progress,
        }
    }

    /// Summaries of the files decoded so far
    pub fn summaries(&self) -> &[FileSummary] {
        &self.summaries
    }

    /// Files that failed so far
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Stop streaming and keep the per-file outcomes
    pub fn finish(self) -> (Vec<FileSummary>, Vec<FileFailure>) {
        (self.summaries, self.failures)
    }

    fn decode_next_file(&mut self) -> Option<()> {
        let path = self.paths.next()?;
        let file = path.display().to_string();
        match self.decoder.decode_file(&path) {
            Ok(decoded) => {
                let summary = decoded.summary();
                self.progress.on_file(&summary);
                self.summaries.push(summary);
                self.pending = decoded.records.into_iter();
            }
            Err(error) => {
                let failure = FileFailure { file, error };
                log::error!("Failed to decode {}", failure);
                self.progress.on_failure(&failure);
                self.failures.push(failure);
            }
        }
        Some(())
    }
}

impl<P: Progress> Iterator for SaleStream<'_, P> {
    type Item = SaleRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(record);
            }
            self.decode_next_file()?;
        }
    }
}

/// All records of a run, concatenated in file order
#[derive(Debug, Default)]
pub struct Assembly {
    pub records: Vec<SaleRecord>,
    pub summaries: Vec<FileSummary>,
    pub failures: Vec<FileFailure>,
}

/// Concatenate per-file outcomes that were decoded elsewhere (e.g. in
/// parallel), keeping the order they are given in
pub fn assemble<I, P>(outcomes: I, progress: &mut P) -> Assembly
where
    I: IntoIterator<Item = (String, crate::Result<FileDecode>)>,
    P: Progress,
{
    let mut assembly = Assembly::default();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(decoded) => {
                let summary = decoded.summary();
                progress.on_file(&summary);
                assembly.summaries.push(summary);
                assembly.records.extend(decoded.records);
            }
            Err(error) => {
                let failure = FileFailure { file, error };
                log::error!("Failed to decode {}", failure);
                progress.on_failure(&failure);
                assembly.failures.push(failure);
            }
        }
    }
    assembly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        files: Vec<(String, usize)>,
        failed: Vec<String>,
    }

    impl Progress for Recorder {
        fn on_file(&mut self, summary: &FileSummary) {
            self.files.push((summary.file.clone(), summary.records));
        }

        fn on_failure(&mut self, failure: &FileFailure) {
            self.failed.push(failure.file.clone());
        }
    }

    const LEGACY: &str = "A;214;VG;19940301 10:15;USER01\n\
                          B;214;VG;1;L1;;;;;;01/02/2020;1;;5;M;;;A;\n\
                          B;214;VG;1;L2;;;;;;01/02/2020;1;;5;M;;;A;\n\
                          Z;3;2\n";

    #[test]
    fn test_assemble_isolates_failures() {
        let decoder = Decoder::default();
        let outcomes = vec![
            (
                "ARCHIVE_SALES_1.DAT".to_string(),
                decoder.decode_reader("ARCHIVE_SALES_1.DAT", LEGACY.as_bytes()),
            ),
            (
                "ARCHIVE_SALES_2.DAT".to_string(),
                Err(DecoderError::MissingHeader { line: 1 }),
            ),
            (
                "ARCHIVE_SALES_3.DAT".to_string(),
                decoder.decode_reader("ARCHIVE_SALES_3.DAT", LEGACY.as_bytes()),
            ),
        ];

        let mut progress = Recorder::default();
        let assembly = assemble(outcomes, &mut progress);
        assert_eq!(assembly.records.len(), 4);
        assert_eq!(assembly.summaries.len(), 2);
        assert_eq!(assembly.failures.len(), 1);
        assert_eq!(assembly.failures[0].file, "ARCHIVE_SALES_2.DAT");
        assert!(assembly.failures[0].to_string().starts_with("ARCHIVE_SALES_2.DAT: "));
        assert_eq!(progress.failed, vec!["ARCHIVE_SALES_2.DAT"]);
        assert_eq!(
            progress.files,
            vec![("ARCHIVE_SALES_1.DAT".to_string(), 2), ("ARCHIVE_SALES_3.DAT".to_string(), 2)]
        );

        let ids: Vec<_> = assembly.records.iter().map(|r| r.property_id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L2", "L1", "L2"]);
    }

    #[test]
    fn test_stream_without_files_is_empty() {
        let decoder = Decoder::default();
        let mut stream = SaleStream::new(&decoder, Vec::new(), NoProgress);
        assert!(stream.next().is_none());
        let (summaries, failures) = stream.finish();
        assert!(summaries.is_empty() && failures.is_empty());
    }
}
