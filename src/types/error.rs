//! Error types for the point ledger
//!
//! This module defines all error types that can occur while mutating balances
//! or while replaying commands from CSV input.
//!
//! # Error Categories
//!
//! - **Rejections**: invalid amount, limit exceeded, insufficient balance.
//!   These are expected outcomes, leave all state untouched and are never
//!   retried by the ledger.
//! - **File I/O Errors**: file not found, permission denied, etc.
//! - **CSV Parsing Errors**: malformed rows, unknown command types.

use super::transaction::{Points, UserId};
use thiserror::Error;

/// Main error type for the point ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Requested charge/use amount is zero or negative
    ///
    /// Detected before any store access.
    #[error("Invalid amount {amount}: amount must be at least 1")]
    InvalidAmount {
        /// The rejected amount
        amount: Points,
    },

    /// A charge would push the balance above the configured limit
    #[error("Point limit exceeded for user {user}: current {current}, requested {requested}, limit {limit}")]
    LimitExceeded {
        /// User ID
        user: UserId,
        /// Balance at the time of the attempt
        current: Points,
        /// Requested charge amount
        requested: Points,
        /// Configured maximum balance
        limit: Points,
    },

    /// A use would drive the balance below zero
    #[error("Insufficient balance for user {user}: current {current}, requested {requested}")]
    InsufficientBalance {
        /// User ID
        user: UserId,
        /// Balance at the time of the attempt
        current: Points,
        /// Requested use amount
        requested: Points,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the row is skipped and replay continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown command type in the input
    #[error("Invalid command type '{command}'")]
    InvalidCommand {
        /// The unrecognised command string
        command: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for LedgerError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Points) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(user: UserId, current: Points, requested: Points, limit: Points) -> Self {
        LedgerError::LimitExceeded {
            user,
            current,
            requested,
            limit,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(user: UserId, current: Points, requested: Points) -> Self {
        LedgerError::InsufficientBalance {
            user,
            current,
            requested,
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(command: &str) -> Self {
        LedgerError::InvalidCommand {
            command: command.to_string(),
        }
    }

    /// Create a ParseError error without position information
    pub fn parse(message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line: None,
            message: message.into(),
        }
    }

    /// Whether this is a business rejection of a charge/use request
    ///
    /// Rejections leave balances and history untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::LimitExceeded { .. }
                | LedgerError::InsufficientBalance { .. }
        )
    }
}
