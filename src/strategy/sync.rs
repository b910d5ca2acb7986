//! Synchronous processing strategy
//!
//! Single-threaded replay: commands are streamed from the CSV file by
//! `SyncReader` and applied one at a time, in file order, to a fresh
//! `PointLedger`.

use crate::core::{LedgerConfig, PointLedger};
use crate::io::csv_format::write_statements_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use point_ledger::core::LedgerConfig;
/// use point_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(LedgerConfig::default());
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(Path::new("commands.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    ledger_config: LedgerConfig,
}

impl SyncProcessingStrategy {
    pub fn new(ledger_config: LedgerConfig) -> Self {
        Self { ledger_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let ledger = PointLedger::new(self.ledger_config);
        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(command) => {
                    if let Err(e) = ledger.apply(command) {
                        tracing::warn!(
                            user_id = command.user_id,
                            kind = %command.kind,
                            amount = command.amount,
                            error = %e,
                            "Command rejected"
                        );
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Skipping invalid row"),
            }
        }

        write_statements_csv(&ledger.statements(), output)
    }
}
