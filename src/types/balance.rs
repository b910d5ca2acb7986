//! Balance-related types for the point ledger
//!
//! This module defines the per-user balance snapshot and the statement type
//! that pairs a balance with the history that produced it.

use super::transaction::{Points, TransactionRecord, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current point balance of a single user
///
/// Balances are created implicitly: a user that has never been charged
/// reads as zero points. Only the ledger's charge/use operations replace a
/// stored balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    /// The user this balance belongs to
    pub user_id: UserId,

    /// Points currently held, always within `0..=max_point`
    pub points: Points,

    /// Time of the last committed mutation
    ///
    /// For a never-written user this is the time of the read.
    pub updated_at: DateTime<Utc>,
}

impl UserBalance {
    /// Create a balance with the given points, stamped now
    pub fn new(user_id: UserId, points: Points) -> Self {
        UserBalance {
            user_id,
            points,
            updated_at: Utc::now(),
        }
    }

    /// Zero balance for a user without any stored state
    pub fn empty(user_id: UserId) -> Self {
        Self::new(user_id, 0)
    }
}

/// A balance together with the complete history behind it
///
/// Captured while holding the user's exclusive section, so the history
/// always replays to exactly `balance.points`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatement {
    pub balance: UserBalance,
    pub history: Vec<TransactionRecord>,
}

impl UserStatement {
    /// Fold the history from a zero balance
    pub fn replayed_points(&self) -> Points {
        self.history
            .iter()
            .fold(0, |points, record| record.kind.apply(points, record.amount))
    }
}
