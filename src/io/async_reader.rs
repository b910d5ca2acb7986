//! Asynchronous CSV reader with batch interface
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PointCommands
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```
//!
//! Rows that fail to parse or convert are logged and skipped; they never
//! end a batch early.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::PointCommand;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides a batch reading interface over point commands.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` commands
    ///
    /// Returns an empty vector once the end of input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PointCommand> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(command) => batch.push(command),
                    Err(e) => tracing::warn!(error = %e, "Skipping invalid command"),
                },
                Some(Err(e)) => tracing::warn!(error = %e, "Skipping malformed CSV row"),
                None => break,
            }
        }

        batch
    }
}
