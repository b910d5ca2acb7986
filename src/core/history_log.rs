//! In-memory transaction history
//!
//! This module provides `InMemoryHistoryLog`, a `DashMap`-backed
//! implementation of [`HistoryLog`].
//!
//! # Design
//!
//! Records are grouped per user in insertion order. Record IDs come from a
//! single atomic counter, so they are unique across users and strictly
//! increasing within each user's sequence.

use crate::core::traits::HistoryLog;
use crate::types::{Points, RecordId, TransactionKind, TransactionRecord, UserId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Volatile append-only history keyed by user ID
#[derive(Debug)]
pub struct InMemoryHistoryLog {
    /// Records per user, oldest first
    records: DashMap<UserId, Vec<TransactionRecord>>,

    /// Next record ID to hand out
    next_id: AtomicU64,
}

impl InMemoryHistoryLog {
    /// Create a new empty log
    ///
    /// The first appended record receives ID 1.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Total number of records across all users
    pub fn len(&self) -> usize {
        self.records.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_record_id(&self) -> RecordId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InMemoryHistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog for InMemoryHistoryLog {
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> TransactionRecord {
        let record = TransactionRecord {
            record_id: self.next_record_id(),
            user_id,
            amount,
            kind,
            timestamp,
        };

        self.records
            .entry(user_id)
            .or_default()
            .push(record.clone());

        record
    }

    fn read_all(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.records
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}
