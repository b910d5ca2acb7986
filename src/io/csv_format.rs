//! CSV format handling for point commands and the balance report
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to `PointCommand`
//! - Report serialization (`user,points,transactions`)
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{LedgerError, PointCommand, Points, TransactionKind, UserId, UserStatement};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, user, amount.
/// The amount is kept as a string so that a malformed value is reported
/// against the row instead of failing the whole deserialization.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: UserId,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a PointCommand
///
/// Only the shape of the row is checked here. Non-positive amounts parse
/// successfully and are rejected by the ledger as `InvalidAmount`.
///
/// # Errors
///
/// * `LedgerError::InvalidCommand` - the type is neither `charge` nor `use`
/// * `LedgerError::ParseError` - the amount is missing or not an integer
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<PointCommand, LedgerError> {
    let kind = match csv_record.kind.trim().to_lowercase().as_str() {
        "charge" => TransactionKind::Charge,
        "use" => TransactionKind::Use,
        _ => return Err(LedgerError::invalid_command(&csv_record.kind)),
    };

    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => {
            amount_str.parse::<Points>().map_err(|_| {
                LedgerError::parse(format!(
                    "Invalid amount '{}' for user {}",
                    amount_str, csv_record.user
                ))
            })?
        }
        _ => {
            return Err(LedgerError::parse(format!(
                "{} command for user {} requires an amount",
                kind, csv_record.user
            )))
        }
    };

    Ok(PointCommand {
        kind,
        user_id: csv_record.user,
        amount,
    })
}

/// Write the balance report in CSV format
///
/// Columns: user, points, transactions. Statements are sorted by user ID for
/// deterministic output.
pub fn write_statements_csv(
    statements: &[UserStatement],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["user", "points", "transactions"])?;

    let mut sorted: Vec<&UserStatement> = statements.iter().collect();
    sorted.sort_by_key(|statement| statement.balance.user_id);

    for statement in sorted {
        writer.write_record(&[
            statement.balance.user_id.to_string(),
            statement.balance.points.to_string(),
            statement.history.len().to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
