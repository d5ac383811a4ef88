//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The ID of a row in the expense table.
pub type ExpenseId = DatabaseId;
/// The ID of a row in the budget table.
pub type BudgetId = DatabaseId;
/// The ID of a row in the category table.
pub type CategoryId = DatabaseId;

/// The response body for endpoints that create or modify a row.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdResponse {
    /// The ID of the row.
    pub id: DatabaseId,
}
