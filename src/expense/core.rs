//! Defines the expense model, its table, and the operations that create, update and delete
//! expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::ExpenseId,
    identity::{Identity, UserID},
};

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded spending transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user who owns the expense.
    pub user_id: UserID,
    /// The amount of money spent.
    ///
    /// Expected to be positive, but this is not enforced.
    pub amount: f64,
    /// The label of the category the expense belongs to, e.g. "Food & Dining".
    pub category: String,
    /// A free-text description of what the money was spent on.
    pub note: String,
    /// When the expense happened as an ISO 8601 date string, e.g. "2024-01-31".
    ///
    /// Dates are stored and compared as strings.
    pub date: String,
}

/// The user-editable fields of an [Expense].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFields {
    /// The amount of money spent.
    pub amount: f64,
    /// The label of the category the expense belongs to.
    pub category: String,
    /// A free-text description of the expense.
    pub note: String,
    /// The date of the expense as a "YYYY-MM-DD" string.
    pub date: String,
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Record a new expense for the caller.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if the caller is anonymous,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn add_expense(
    identity: Identity,
    fields: ExpenseFields,
    connection: &Connection,
) -> Result<ExpenseId, Error> {
    let user_id = identity.require()?;
    let expense = create_expense(user_id, fields, connection)?;

    tracing::debug!("Created expense {} for user {user_id}", expense.id);

    Ok(expense.id)
}

/// Replace the fields of one of the caller's expenses.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if the caller is anonymous,
/// - [Error::NotFoundOrUnauthorized] if `id` does not refer to one of the caller's expenses,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    identity: Identity,
    id: ExpenseId,
    fields: ExpenseFields,
    connection: &Connection,
) -> Result<ExpenseId, Error> {
    let user_id = identity.require()?;

    let rows_affected = connection.execute(
        "UPDATE expense \
        SET amount = ?1, category = ?2, note = ?3, date = ?4 \
        WHERE id = ?5 AND user_id = ?6",
        params![
            fields.amount,
            fields.category,
            fields.note,
            fields.date,
            id,
            user_id.as_i64(),
        ],
    )?;

    if rows_affected == 0 {
        tracing::warn!("User {user_id} tried to update expense {id} which they do not own");
        return Err(Error::NotFoundOrUnauthorized);
    }

    Ok(id)
}

/// Delete one of the caller's expenses.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if the caller is anonymous,
/// - [Error::NotFoundOrUnauthorized] if `id` does not refer to one of the caller's expenses,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(
    identity: Identity,
    id: ExpenseId,
    connection: &Connection,
) -> Result<(), Error> {
    let user_id = identity.require()?;

    let rows_affected = connection.execute(
        "DELETE FROM expense WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        tracing::warn!("User {user_id} tried to delete expense {id} which they do not own");
        return Err(Error::NotFoundOrUnauthorized);
    }

    Ok(())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new expense owned by `user_id`.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_expense(
    user_id: UserID,
    fields: ExpenseFields,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (user_id, amount, category, note, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, amount, category, note, date",
        )?
        .query_row(
            params![
                user_id.as_i64(),
                fields.amount,
                fields.category,
                fields.note,
                fields.date
            ],
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense by its `id`, regardless of who owns it.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, user_id, amount, category, note, date FROM expense WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Create the expense table and the indexes for per-user date and category lookups.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            note TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_expense_user_category ON expense(user_id, category);",
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
///
/// The row must contain the columns `id, user_id, amount, category, note, date` in that order.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = UserID::new(row.get(1)?);
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let note = row.get(4)?;
    let date = row.get(5)?;

    Ok(Expense {
        id,
        user_id,
        amount,
        category,
        note,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
