//! Transaction-related types for the point ledger
//!
//! This module defines the identifiers, transaction kinds, immutable history
//! records and inbound commands used throughout the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier
///
/// Opaque to the ledger; any `u64` is a valid, implicitly existing user.
pub type UserId = u64;

/// Point amount
///
/// Signed so that zero and negative request amounts can be represented and
/// rejected by validation instead of by the type system.
pub type Points = i64;

/// History record identifier
///
/// Assigned by the history log starting at 1, strictly increasing.
pub type RecordId = u64;

/// Kind of balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit points to a user
    ///
    /// Rejected when the resulting balance would exceed the configured limit.
    Charge,

    /// Debit points from a user
    ///
    /// Rejected when the resulting balance would drop below zero.
    Use,
}

impl TransactionKind {
    /// Apply this kind of mutation to `points` without any bounds checks
    ///
    /// Used when replaying history; live mutations go through the ledger.
    pub fn apply(self, points: Points, amount: Points) -> Points {
        match self {
            TransactionKind::Charge => points + amount,
            TransactionKind::Use => points - amount,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Charge => "charge",
            TransactionKind::Use => "use",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable history entry for one committed charge or use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique, strictly increasing identifier
    pub record_id: RecordId,

    /// Owner of the transaction
    pub user_id: UserId,

    /// Positive magnitude of the mutation
    pub amount: Points,

    /// Whether the amount was charged or used
    pub kind: TransactionKind,

    /// Commit time, equal to the `updated_at` of the balance it produced
    pub timestamp: DateTime<Utc>,
}

/// Inbound charge/use request
///
/// Produced by the replay facade from CSV input and routed by
/// `PointLedger::apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCommand {
    /// Whether to charge or use
    pub kind: TransactionKind,

    /// The user this command applies to
    pub user_id: UserId,

    /// Requested amount, validated by the ledger
    pub amount: Points,
}

impl PointCommand {
    pub fn charge(user_id: UserId, amount: Points) -> Self {
        PointCommand {
            kind: TransactionKind::Charge,
            user_id,
            amount,
        }
    }

    pub fn use_points(user_id: UserId, amount: Points) -> Self {
        PointCommand {
            kind: TransactionKind::Use,
            user_id,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::charge(TransactionKind::Charge, 100, 30, 130)]
    #[case::use_points(TransactionKind::Use, 100, 30, 70)]
    fn test_kind_apply(
        #[case] kind: TransactionKind,
        #[case] points: Points,
        #[case] amount: Points,
        #[case] expected: Points,
    ) {
        assert_eq!(kind.apply(points, amount), expected);
    }

    #[test]
    fn test_kind_display_matches_csv_names() {
        assert_eq!(TransactionKind::Charge.to_string(), "charge");
        assert_eq!(TransactionKind::Use.to_string(), "use");
    }

    #[test]
    fn test_command_constructors() {
        assert_eq!(
            PointCommand::charge(1, 50),
            PointCommand {
                kind: TransactionKind::Charge,
                user_id: 1,
                amount: 50
            }
        );
        assert_eq!(PointCommand::use_points(2, 10).kind, TransactionKind::Use);
    }
}
