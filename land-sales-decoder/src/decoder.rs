//! Main decoder API
//!
//! The Decoder routes each file to a dialect by name and runs the matching
//! layout over its lines. A Decoder holds only configuration, so one instance
//! can be shared by any number of threads decoding different files.

use crate::config::DecoderConfig;
use crate::file_decoder;
use crate::formats::{LegacyLayout, ModernLayout};
use crate::types::{Dialect, FileDecode, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a new decoder instance
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Pick the dialect for a file name
    ///
    /// Names that match neither marker are [`Dialect::Unsupported`]; those
    /// decode to an empty record set rather than an error.
    pub fn route(&self, file_name: &str) -> Dialect {
        if file_name.contains(&self.config.legacy_marker) {
            Dialect::Legacy
        } else if file_name.contains(&self.config.modern_marker) {
            Dialect::Modern
        } else {
            Dialect::Unsupported
        }
    }

    /// Decode lines from any buffered reader
    ///
    /// `file_name` selects the dialect and identifies the file in logs and
    /// diagnostics.
    ///
    /// # Example
    /// ```
    /// use land_sales_decoder::{Decoder, DecoderConfig};
    ///
    /// let text = "A;214;VG;19940301 10:15;USER01\n\
    ///             B;214;VG;1;2;;;;;;01/02/2020;1;;5;M;;;A;\n\
    ///             Z;2;1\n";
    /// let decoder = Decoder::new(DecoderConfig::new());
    /// let decoded = decoder.decode_reader("ARCHIVE_SALES_214.DAT", text.as_bytes()).unwrap();
    /// assert_eq!(decoded.records[0].contract_date, "20200201");
    /// ```
    pub fn decode_reader<R: BufRead>(&self, file_name: &str, reader: R) -> Result<FileDecode> {
        let dialect = self.route(file_name);
        log::debug!("{}: routed to {} dialect", file_name, dialect);

        match dialect {
            Dialect::Legacy => file_decoder::decode_lines(&LegacyLayout, file_name, reader, &self.config),
            Dialect::Modern => file_decoder::decode_lines(&ModernLayout, file_name, reader, &self.config),
            Dialect::Unsupported => {
                log::debug!("{}: not a sale file, skipping", file_name);
                Ok(FileDecode::unroutable(file_name))
            }
        }
    }

    /// Decode a file on disk
    ///
    /// Unsupported files are not opened.
    pub fn decode_file(&self, path: &Path) -> Result<FileDecode> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        if self.route(&file_name) == Dialect::Unsupported {
            return Ok(FileDecode::unroutable(file_name));
        }

        log::info!("Decoding sale file: {:?}", path);
        let file = File::open(path)?;
        self.decode_reader(&file_name, BufReader::new(file))
    }
}
