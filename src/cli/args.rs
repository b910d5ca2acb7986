use crate::core::{LedgerConfig, MAX_POINT};
use crate::strategy::BatchConfig;
use crate::types::Points;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay point charge/use commands and report final balances
#[derive(Parser, Debug)]
#[command(name = "point-ledger")]
#[command(about = "Replay point charge/use commands and report final balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing `type,user,amount` rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for single-threaded or 'async' for parallel"
    )]
    pub strategy: StrategyType,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Upper bound for any user's balance
    #[arg(
        long = "max-point",
        value_name = "POINTS",
        default_value_t = MAX_POINT,
        allow_negative_numbers = true,
        help = "Maximum balance a charge may produce"
    )]
    pub max_point: Points,

    /// Let same-user commands race instead of running in file order (async mode only)
    #[arg(long = "unordered", help = "Dispatch every command on its own task")]
    pub unordered: bool,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, using defaults for anything
    /// not provided
    pub fn to_batch_config(&self) -> BatchConfig {
        let default = BatchConfig::default();
        let config = BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent_batches
                .unwrap_or(default.max_concurrent_batches),
        );

        if self.unordered {
            config.unordered()
        } else {
            config
        }
    }

    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.max_point)
    }
}
