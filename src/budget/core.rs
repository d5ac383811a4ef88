//! The monthly budget model and its database operations.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::BudgetId,
    identity::{Identity, UserID},
};

/// The amount a user plans to spend in a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The user who owns the budget.
    pub user_id: UserID,
    /// The month the budget applies to as a "YYYY-MM" string.
    pub month: String,
    /// The planned spending for the month.
    pub amount: f64,
}

/// Get the caller's budget for `month`.
///
/// Returns `None` for anonymous callers and for months without a budget.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_budget(
    identity: Identity,
    month: &str,
    connection: &Connection,
) -> Result<Option<Budget>, Error> {
    match identity.user_id() {
        Some(user_id) => find_budget(user_id, month, connection),
        None => Ok(None),
    }
}

/// Set the caller's budget for `month` to `amount`.
///
/// An existing budget for the month keeps its ID and has its amount replaced, otherwise a new
/// budget is created. There is at most one budget per user and month.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if the caller is anonymous,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn set_budget(
    identity: Identity,
    month: &str,
    amount: f64,
    connection: &Connection,
) -> Result<Budget, Error> {
    let user_id = identity.require()?;
    let transaction = connection.unchecked_transaction()?;

    let budget = match find_budget(user_id, month, &transaction)? {
        Some(existing) => {
            transaction.execute(
                "UPDATE budget SET amount = ?1 WHERE id = ?2",
                (amount, existing.id),
            )?;

            Budget { amount, ..existing }
        }
        None => transaction
            .prepare(
                "INSERT INTO budget (user_id, month, amount) VALUES (?1, ?2, ?3)
                 RETURNING id, user_id, month, amount",
            )?
            .query_row((user_id.as_i64(), month, amount), map_row)?,
    };

    transaction.commit()?;
    tracing::debug!("Set budget for user {user_id} in {month} to {amount}");

    Ok(budget)
}

fn find_budget(
    user_id: UserID,
    month: &str,
    connection: &Connection,
) -> Result<Option<Budget>, Error> {
    let budget = connection
        .prepare(
            "SELECT id, user_id, month, amount FROM budget
             WHERE user_id = ?1 AND month = ?2
             ORDER BY id ASC LIMIT 1",
        )?
        .query_row((user_id.as_i64(), month), map_row)
        .optional()?;

    Ok(budget)
}

/// Initialize the budget table and indexes.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            month TEXT NOT NULL,
            amount REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_budget_user_month ON budget(user_id, month);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = UserID::new(row.get(1)?);
    let month = row.get(2)?;
    let amount = row.get(3)?;

    Ok(Budget {
        id,
        user_id,
        month,
        amount,
    })
}
