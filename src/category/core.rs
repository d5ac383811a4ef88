//! The category model and its database operations.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CategoryId,
    identity::{Identity, UserID},
};

/// A label for grouping expenses, e.g. "Food & Dining", with a display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The label shown to the user and stored on expenses.
    pub name: String,
    /// A CSS hex colour, e.g. "#ef4444".
    pub color: String,
}

impl Category {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_owned(),
            color: color.to_owned(),
        }
    }
}

/// The categories shown to users that have not created any of their own.
///
/// These are never written to the database.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Food & Dining", "#ef4444"),
        Category::new("Transportation", "#3b82f6"),
        Category::new("Shopping", "#8b5cf6"),
        Category::new("Entertainment", "#f59e0b"),
        Category::new("Bills & Utilities", "#10b981"),
        Category::new("Healthcare", "#ec4899"),
        Category::new("Other", "#6b7280"),
    ]
}

/// List the caller's categories in the order they were created.
///
/// Users without any stored categories get [default_categories]. Anonymous callers get an empty
/// list.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn list_categories(identity: Identity, connection: &Connection) -> Result<Vec<Category>, Error> {
    let Some(user_id) = identity.user_id() else {
        return Ok(Vec::new());
    };

    let categories = get_user_categories(user_id, connection)?;

    if categories.is_empty() {
        Ok(default_categories())
    } else {
        Ok(categories)
    }
}

/// Store a new category for the caller.
///
/// Category names are not checked for uniqueness.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if the caller is anonymous,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn add_category(
    identity: Identity,
    category: Category,
    connection: &Connection,
) -> Result<CategoryId, Error> {
    let user_id = identity.require()?;

    connection.execute(
        "INSERT INTO category (user_id, name, color) VALUES (?1, ?2, ?3)",
        (user_id.as_i64(), &category.name, &category.color),
    )?;

    let id = connection.last_insert_rowid();
    tracing::debug!("Created category {id} \"{}\" for user {user_id}", category.name);

    Ok(id)
}

fn get_user_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT name, color FROM category WHERE user_id = :user_id ORDER BY id ASC")?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            color TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_user ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let name = row.get(0)?;
    let color = row.get(1)?;

    Ok(Category { name, color })
}
