//! Asynchronous batch processing strategy
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches, preserve_user_order)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (user partitioning + tokio tasks)
//!     └── PointLedger (per-user locked mutation engine)
//! ```
//!
//! # Thread-Based Parallelism
//!
//! - Batches are processed one after another, so a user's commands never
//!   overtake each other across batch boundaries
//! - Within a batch, users run in parallel on a multi-threaded tokio runtime
//! - With `preserve_user_order` off, each command gets its own task and
//!   same-user commands are ordered only by the ledger's per-user lock

use crate::core::{BatchProcessor, LedgerConfig, PointLedger};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_statements_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
    /// Keep each user's commands in input order
    pub preserve_user_order: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
            preserve_user_order: true,
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
            preserve_user_order: default.preserve_user_order,
        }
    }

    /// Dispatch every command on its own task
    pub fn unordered(mut self) -> Self {
        self.preserve_user_order = false;
        self
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    ledger_config: LedgerConfig,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(ledger_config: LedgerConfig, config: BatchConfig) -> Self {
        Self {
            ledger_config,
            config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()?;

        runtime.block_on(async {
            let ledger = PointLedger::new(self.ledger_config);
            let processor = BatchProcessor::new(ledger.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
                        path: input_path.display().to_string(),
                    },
                    _ => LedgerError::from(e),
                })?;

            // csv-async reads futures::io, not tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = if self.config.preserve_user_order {
                    processor.process_batch(batch).await
                } else {
                    processor.process_batch_unordered(batch).await
                };

                for processed in &results {
                    if let Err(e) = &processed.result {
                        tracing::warn!(
                            user_id = processed.command.user_id,
                            kind = %processed.command.kind,
                            amount = processed.command.amount,
                            error = %e,
                            "Command rejected"
                        );
                    }
                }
            }

            write_statements_csv(&ledger.statements(), output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(config: BatchConfig, csv_content: &str) -> String {
        let file = create_temp_csv(csv_content);
        let strategy = AsyncProcessingStrategy::new(LedgerConfig::default(), config);
        let mut output = Vec::new();

        strategy.process(file.path(), &mut output).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);

        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn test_batch_config_unordered() {
        let config = BatchConfig::new(10, 2).unordered();

        assert_eq!(config.batch_size, 10);
        assert_eq!(config.max_concurrent_batches, 2);
        assert!(!config.preserve_user_order);
    }

    #[test]
    fn test_async_strategy_processes_multiple_users() {
        let output = run(
            BatchConfig::default(),
            "type,user,amount\ncharge,1,100\ncharge,2,200\nuse,1,30\n",
        );

        assert_eq!(output, "user,points,transactions\n1,70,2\n2,200,1\n");
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // Small batches force user 1's commands to span several of them
        let output = run(
            BatchConfig::new(2, num_cpus::get()),
            "type,user,amount\n\
             charge,1,100\n\
             charge,2,50\n\
             use,1,30\n\
             charge,2,25\n\
             use,1,70\n\
             use,2,75\n",
        );

        assert_eq!(output, "user,points,transactions\n1,0,3\n2,0,3\n");
    }

    #[test]
    fn test_async_strategy_unordered_same_user_charges() {
        let mut csv_content = String::from("type,user,amount\n");
        for _ in 0..100 {
            csv_content.push_str("charge,9,10\n");
        }

        let output = run(BatchConfig::new(25, 4).unordered(), &csv_content);

        assert_eq!(output, "user,points,transactions\n9,1000,100\n");
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(LedgerConfig::default(), BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }
}
