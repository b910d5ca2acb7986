//! In-memory balance storage
//!
//! This module provides `InMemoryBalanceStore`, a `DashMap`-backed
//! implementation of [`BalanceStore`].
//!
//! # Thread Safety
//!
//! `DashMap` shards its internal locks, so reads and writes for different
//! users rarely contend. Each operation holds a shard lock only for the
//! duration of a single insert or clone, which is what makes individual
//! reads and writes atomic. Serializing read-modify-write sequences is not
//! this store's job; the ledger does that with its per-user locks.

use crate::core::traits::BalanceStore;
use crate::types::{Points, UserBalance, UserId};
use dashmap::DashMap;

/// Volatile balance store keyed by user ID
#[derive(Debug)]
pub struct InMemoryBalanceStore {
    balances: DashMap<UserId, UserBalance>,
}

impl InMemoryBalanceStore {
    /// Create a new empty store
    ///
    /// Users appear in the store on their first write.
    pub fn new() -> Self {
        Self {
            balances: DashMap::new(),
        }
    }

    /// Number of users with a stored balance
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl Default for InMemoryBalanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    /// Unknown users read as zero without being inserted.
    fn read(&self, user_id: UserId) -> UserBalance {
        self.balances
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| UserBalance::empty(user_id))
    }

    fn write(&self, user_id: UserId, points: Points) -> UserBalance {
        let balance = UserBalance::new(user_id, points);
        self.balances.insert(user_id, balance.clone());
        balance
    }

    fn all(&self) -> Vec<UserBalance> {
        self.balances
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
