//! Processing strategy module for command replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! covering CSV parsing, command application and report output. Different
//! implementations (synchronous, asynchronous batch) can be selected at
//! runtime.

use crate::cli::StrategyType;
use crate::core::LedgerConfig;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay commands from `input_path` and write the balance report to `output`
    ///
    /// Malformed rows and rejected commands are logged and skipped; they do
    /// not cause this method to fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened, the runtime cannot be
    /// started, or the report cannot be written.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `batch_config` is ignored by the sync strategy; the async strategy falls
/// back to `BatchConfig::default()` when it is `None`.
pub fn create_strategy(
    strategy_type: StrategyType,
    ledger_config: LedgerConfig,
    batch_config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(ledger_config)),
        StrategyType::Async => {
            let batch_config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(ledger_config, batch_config))
        }
    }
}
