//! Point Ledger Library
//! # Overview
//!
//! This library maintains per-user point balances that can be charged or
//! used, with an append-only history of every committed transaction.
//! Concurrent requests for the same user are linearizable; requests for
//! different users never wait on each other.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UserBalance, TransactionRecord, errors)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Charge/use orchestration under per-user exclusion
//!   - [`core::user_locks`] - Lazily created mutex per user
//!   - [`core::balance_store`] - Current balance per user
//!   - [`core::history_log`] - Append-only transaction history
//!   - [`core::batch_processor`] - Concurrent dispatch of command batches
//! - [`io`] - CSV command input and balance report output
//! - [`strategy`] - Sync and async replay pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Operations
//!
//! - **get_balance**: Current balance; unknown users read as zero
//! - **charge**: Credit points, bounded above by `max_point`
//! - **use_points**: Debit points, never below zero
//! - **get_history**: All records of a user in commit order
//!
//! # Example
//!
//! ```
//! use point_ledger::{LedgerConfig, LedgerError, PointLedger};
//!
//! let ledger = PointLedger::new(LedgerConfig::default());
//!
//! ledger.charge(1, 1_000).unwrap();
//! let balance = ledger.use_points(1, 400).unwrap();
//! assert_eq!(balance.points, 600);
//!
//! let rejected = ledger.use_points(1, 10_000);
//! assert!(matches!(rejected, Err(LedgerError::InsufficientBalance { .. })));
//! assert_eq!(ledger.get_history(1).len(), 2);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    BalanceStore, HistoryLog, InMemoryBalanceStore, InMemoryHistoryLog, LedgerConfig,
    PointLedger, MAX_POINT,
};
pub use crate::io::write_statements_csv;
pub use types::{
    LedgerError, PointCommand, Points, RecordId, TransactionKind, TransactionRecord, UserBalance,
    UserId, UserStatement,
};
