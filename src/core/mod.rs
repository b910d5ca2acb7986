//! Core business logic module
//!
//! This module contains the point mutation engine and its collaborators:
//! - `traits` - Store abstractions the ledger is generic over
//! - `balance_store` - In-memory current balance per user
//! - `history_log` - In-memory append-only transaction history
//! - `user_locks` - Lazily created mutex per user
//! - `ledger` - Charge/use orchestration under per-user exclusion
//! - `batch_processor` - Concurrent dispatch of command batches
//! - `config` - Ledger settings (`MAX_POINT`)

pub mod balance_store;
pub mod batch_processor;
pub mod config;
pub mod history_log;
pub mod ledger;
pub mod traits;
pub mod user_locks;

pub use balance_store::InMemoryBalanceStore;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use config::{LedgerConfig, MAX_POINT};
pub use history_log::InMemoryHistoryLog;
pub use ledger::PointLedger;
pub use traits::{BalanceStore, HistoryLog};
pub use user_locks::UserLocks;
