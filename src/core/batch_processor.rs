//! Batch dispatch of point commands onto tokio tasks
//!
//! This module provides the `BatchProcessor` struct, which fans a batch of
//! commands out over a multi-threaded tokio runtime.
//!
//! # Dispatch Modes
//!
//! - [`BatchProcessor::process_batch`] partitions the batch by user and runs
//!   each user's commands sequentially, in input order, on a task of their
//!   own. Different users run in parallel. Results are deterministic.
//! - [`BatchProcessor::process_batch_unordered`] spawns one task per command.
//!   Commands for the same user race; the ledger's per-user lock serializes
//!   them in an unspecified order.
//!
//! Ledger calls never await, so a task that has entered a user's critical
//! section always finishes it before yielding.

use std::collections::HashMap;

use super::PointLedger;
use crate::types::{LedgerError, PointCommand, UserBalance, UserId};

/// Result of processing a single command
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was processed
    pub command: PointCommand,

    /// The resulting balance, or why the command was rejected
    pub result: Result<UserBalance, LedgerError>,
}

/// Concurrent command dispatcher over a shared ledger
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: PointLedger,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// The ledger is cloned into every spawned task; clones share state.
    pub fn new(ledger: PointLedger) -> Self {
        Self { ledger }
    }

    /// Partition a batch of commands by user ID
    ///
    /// # Guarantees
    ///
    /// - Each command appears in exactly one sub-batch
    /// - Commands for each user keep their original order
    pub fn partition_by_user(
        &self,
        batch: Vec<PointCommand>,
    ) -> HashMap<UserId, Vec<PointCommand>> {
        let mut user_batches: HashMap<UserId, Vec<PointCommand>> = HashMap::new();

        for command in batch {
            user_batches
                .entry(command.user_id)
                .or_default()
                .push(command);
        }

        user_batches
    }

    /// Process all commands for a single user sequentially
    ///
    /// Rejected commands are captured in the results and do not stop the
    /// remaining ones.
    pub async fn process_user_commands(&self, commands: Vec<PointCommand>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let result = self.ledger.apply(command);
            results.push(ProcessingResult { command, result });
        }

        results
    }

    /// Process a batch with per-user ordering preserved
    ///
    /// Results for one user are contiguous and in input order; the order of
    /// users is unspecified.
    pub async fn process_batch(&self, batch: Vec<PointCommand>) -> Vec<ProcessingResult> {
        let user_batches = self.partition_by_user(batch);

        let mut tasks = Vec::with_capacity(user_batches.len());
        for (_user_id, commands) in user_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_user_commands(commands).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(user_results) => results.extend(user_results),
                Err(e) => tracing::error!(error = %e, "Command task panicked"),
            }
        }

        results
    }

    /// Process a batch with every command on its own task
    pub async fn process_batch_unordered(&self, batch: Vec<PointCommand>) -> Vec<ProcessingResult> {
        let mut tasks = Vec::with_capacity(batch.len());
        for command in batch {
            let ledger = self.ledger.clone();
            tasks.push(tokio::spawn(async move {
                ProcessingResult {
                    command,
                    result: ledger.apply(command),
                }
            }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!(error = %e, "Command task panicked"),
            }
        }

        results
    }
}
