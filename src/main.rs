//! Point Ledger CLI
//!
//! Replays point charge/use commands from a CSV file and prints the final
//! balance of every user.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > balances.csv
//! cargo run -- --strategy sync commands.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 commands.csv
//! cargo run -- --max-point 50000 --unordered commands.csv
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`
//! (default `info,point_ledger=info`); stdout carries only the report.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, output not writable, etc.)

use point_ledger::cli;
use point_ledger::strategy;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,point_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::parse_args();

    let ledger_config = args.to_ledger_config();
    let strategy = {
        let batch_config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), ledger_config, batch_config)
    };

    tracing::info!(
        input = %args.input_file.display(),
        strategy = ?args.strategy,
        max_point = ledger_config.max_point,
        "Replaying point commands"
    );

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "Replay failed");
        process::exit(1);
    }
}
