//! Core traits for balance storage and transaction history
//!
//! The ledger only depends on these traits, so the in-memory stores can be
//! swapped for another backend without touching the concurrency protocol.
//! Both traits take `&self` and must be `Send + Sync`: a single store
//! instance is shared by every per-user critical section.

use crate::types::{Points, TransactionKind, TransactionRecord, UserBalance, UserId};
use chrono::{DateTime, Utc};

/// Passive key-value mapping from user to current balance
///
/// Implementations perform no business validation. Each individual `read`
/// or `write` must be atomic on its own: a reader racing a writer observes
/// either the old or the new balance, never a torn value.
pub trait BalanceStore: Send + Sync {
    /// Get the current balance, or a zero balance if the user is unknown
    fn read(&self, user_id: UserId) -> UserBalance;

    /// Replace the stored balance with `points`, stamped now
    fn write(&self, user_id: UserId, points: Points) -> UserBalance;

    /// Snapshot of every stored balance, in arbitrary order
    fn all(&self) -> Vec<UserBalance>;
}

/// Append-only log of transaction records per user
pub trait HistoryLog: Send + Sync {
    /// Append an immutable record and assign it a fresh, strictly increasing id
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> TransactionRecord;

    /// All records for `user_id` in insertion order; empty if none exist
    fn read_all(&self, user_id: UserId) -> Vec<TransactionRecord>;
}
