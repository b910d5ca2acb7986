//! Point ledger engine
//!
//! This module provides `PointLedger`, which coordinates the balance store
//! and the history log under a per-user mutual-exclusion discipline.
//!
//! # Architecture
//!
//! ```text
//! PointLedger
//!     ├── Arc<B: BalanceStore>  (current balance per user)
//!     ├── Arc<H: HistoryLog>    (append-only records per user)
//!     ├── Arc<UserLocks>        (one mutex per user, created lazily)
//!     └── LedgerConfig          (max_point)
//! ```
//!
//! # Mutation Protocol
//!
//! `charge` and `use_points` validate the amount, then enter the user's
//! critical section and run read → check bounds → write balance → append
//! record without yielding. Rejected requests return before any write, so a
//! failed call leaves both stores exactly as they were.
//!
//! The balance is written before the record is appended. A lock-free
//! `get_history` therefore never returns a record whose balance has not been
//! committed yet. Callers that need the balance and history as one
//! consistent pair use [`PointLedger::statement`].
//!
//! # Thread Safety
//!
//! `PointLedger` is `Clone`; clones share stores and locks, so they can be
//! handed to threads or tokio tasks freely. Operations for different users
//! proceed in parallel.

use std::sync::Arc;

use crate::core::balance_store::InMemoryBalanceStore;
use crate::core::config::LedgerConfig;
use crate::core::history_log::InMemoryHistoryLog;
use crate::core::traits::{BalanceStore, HistoryLog};
use crate::core::user_locks::UserLocks;
use crate::types::{
    LedgerError, PointCommand, Points, TransactionKind, TransactionRecord, UserBalance, UserId,
    UserStatement,
};

/// Concurrent per-user point ledger
#[derive(Debug)]
pub struct PointLedger<B = InMemoryBalanceStore, H = InMemoryHistoryLog> {
    balances: Arc<B>,
    history: Arc<H>,
    locks: Arc<UserLocks>,
    config: LedgerConfig,
}

impl PointLedger {
    /// Create a ledger backed by fresh in-memory stores
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_stores(
            Arc::new(InMemoryBalanceStore::new()),
            Arc::new(InMemoryHistoryLog::new()),
            config,
        )
    }
}

impl Default for PointLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<B, H> Clone for PointLedger<B, H> {
    fn clone(&self) -> Self {
        Self {
            balances: Arc::clone(&self.balances),
            history: Arc::clone(&self.history),
            locks: Arc::clone(&self.locks),
            config: self.config,
        }
    }
}

impl<B: BalanceStore, H: HistoryLog> PointLedger<B, H> {
    /// Create a ledger over caller-provided stores
    ///
    /// The stores must not be mutated by anything other than this ledger (or
    /// its clones); the per-user locks only protect writes made through it.
    pub fn with_stores(balances: Arc<B>, history: Arc<H>, config: LedgerConfig) -> Self {
        Self {
            balances,
            history,
            locks: Arc::new(UserLocks::new()),
            config,
        }
    }

    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// Current balance of `user_id`; zero for an unknown user
    ///
    /// Does not take the user's lock. A read racing a mutation returns
    /// either the pre- or post-mutation balance.
    pub fn get_balance(&self, user_id: UserId) -> UserBalance {
        self.balances.read(user_id)
    }

    /// Credit `amount` points to `user_id`
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - `amount` is zero or negative
    /// * `LedgerError::LimitExceeded` - the new balance would exceed `max_point`
    pub fn charge(&self, user_id: UserId, amount: Points) -> Result<UserBalance, LedgerError> {
        ensure_positive(amount)?;

        self.locks.with_lock(user_id, || {
            let current = self.balances.read(user_id);
            let limit = self.config.max_point;

            let updated = current
                .points
                .checked_add(amount)
                .filter(|points| *points <= limit)
                .ok_or_else(|| {
                    LedgerError::limit_exceeded(user_id, current.points, amount, limit)
                });

            match updated {
                Ok(points) => Ok(self.commit(user_id, amount, TransactionKind::Charge, points)),
                Err(e) => {
                    tracing::debug!(user_id, amount, error = %e, "Charge rejected");
                    Err(e)
                }
            }
        })
    }

    /// Debit `amount` points from `user_id`
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - `amount` is zero or negative
    /// * `LedgerError::InsufficientBalance` - the balance is smaller than `amount`
    pub fn use_points(&self, user_id: UserId, amount: Points) -> Result<UserBalance, LedgerError> {
        ensure_positive(amount)?;

        self.locks.with_lock(user_id, || {
            let current = self.balances.read(user_id);

            if current.points < amount {
                let e = LedgerError::insufficient_balance(user_id, current.points, amount);
                tracing::debug!(user_id, amount, error = %e, "Use rejected");
                return Err(e);
            }

            let points = current.points - amount;
            Ok(self.commit(user_id, amount, TransactionKind::Use, points))
        })
    }

    /// All committed records of `user_id`, oldest first; empty if none
    pub fn get_history(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.history.read_all(user_id)
    }

    /// Route a command to `charge` or `use_points`
    pub fn apply(&self, command: PointCommand) -> Result<UserBalance, LedgerError> {
        match command.kind {
            TransactionKind::Charge => self.charge(command.user_id, command.amount),
            TransactionKind::Use => self.use_points(command.user_id, command.amount),
        }
    }

    /// Balance and history of `user_id`, captured atomically
    ///
    /// Waits for any in-flight mutation of the user, so the history always
    /// replays to exactly the returned balance.
    pub fn statement(&self, user_id: UserId) -> UserStatement {
        self.locks.with_lock(user_id, || UserStatement {
            balance: self.balances.read(user_id),
            history: self.history.read_all(user_id),
        })
    }

    /// Statements for every user with a stored balance, sorted by user ID
    ///
    /// Each statement is consistent on its own; the set as a whole is not a
    /// global snapshot.
    pub fn statements(&self) -> Vec<UserStatement> {
        let mut users: Vec<UserId> = self.balances.all().iter().map(|b| b.user_id).collect();
        users.sort_unstable();

        users.into_iter().map(|user| self.statement(user)).collect()
    }

    /// Write the new balance, then record it. Must run inside the user's lock.
    fn commit(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionKind,
        points: Points,
    ) -> UserBalance {
        let balance = self.balances.write(user_id, points);
        let record = self
            .history
            .append(user_id, amount, kind, balance.updated_at);

        tracing::debug!(
            user_id,
            record_id = record.record_id,
            kind = %kind,
            amount,
            points,
            "Transaction committed"
        );

        balance
    }
}

fn ensure_positive(amount: Points) -> Result<(), LedgerError> {
    if amount < 1 {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}
