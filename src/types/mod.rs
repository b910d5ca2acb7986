//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `balance`: Per-user balance and statement types
//! - `transaction`: Identifiers, history records and inbound commands
//! - `error`: Error types for the point ledger

pub mod balance;
pub mod error;
pub mod transaction;

pub use balance::{UserBalance, UserStatement};
pub use error::LedgerError;
pub use transaction::{
    PointCommand, Points, RecordId, TransactionKind, TransactionRecord, UserId,
};
