//! Per-user mutual exclusion
//!
//! This module provides `UserLocks`, a lazily populated map from user ID to
//! an independent mutex. Mutations for the same user are serialized through
//! that user's mutex, while mutations for different users never wait on each
//! other.
//!
//! # Design
//!
//! The lock map itself is a `DashMap`, whose get-or-create is the only
//! globally shared synchronization point. The shard guard is released as
//! soon as the user's `Arc<Mutex<()>>` has been cloned out, so waiting on a
//! busy user never blocks other users that hash to the same shard.
//!
//! Entries are never removed: users are never deleted, and dropping an entry
//! while another thread holds a clone of it would let two threads lock two
//! different mutexes for the same user.

use crate::types::UserId;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Lazily created mutex per user
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Run `f` while holding exclusive access for `user_id`
    ///
    /// The closure runs to completion before the lock is released; there is
    /// no way to abandon a critical section once it has been entered.
    ///
    /// A poisoned mutex is recovered rather than propagated. The guarded
    /// value is `()`, and the ledger's critical sections validate before they
    /// write, so a panicking holder cannot leave a half-validated mutation
    /// behind.
    pub fn with_lock<R>(&self, user_id: UserId, f: impl FnOnce() -> R) -> R {
        let lock = self.handle(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of users that have ever been locked
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Get or atomically create the mutex for `user_id`
    fn handle(&self, user_id: UserId) -> Arc<Mutex<()>> {
        // Fast path takes only a shard read lock.
        if let Some(lock) = self.locks.get(&user_id) {
            return Arc::clone(lock.value());
        }

        Arc::clone(self.locks.entry(user_id).or_default().value())
    }
}
