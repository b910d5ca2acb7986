//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over point commands from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PointCommand, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use point_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("commands.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Applying command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as `LedgerError::ParseError` carrying
//!   the line number, and iteration continues with the next row

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerError, PointCommand};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time; memory use does not grow with the file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// The reader trims whitespace from all fields and allows a missing
    /// trailing amount column.
    ///
    /// # Errors
    ///
    /// * `LedgerError::FileNotFound` - nothing exists at `path`
    /// * `LedgerError::IoError` - the file exists but cannot be opened
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<PointCommand, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;

        // Line 1 is the header
        self.line_num += 1;
        let line = self.line_num;

        Some(
            next.map_err(LedgerError::from)
                .and_then(convert_csv_record)
                .map_err(|e| match e {
                    LedgerError::ParseError { line: Some(_), .. } => e,
                    other => LedgerError::ParseError {
                        line: Some(line),
                        message: other.to_string(),
                    },
                }),
        )
    }
}
