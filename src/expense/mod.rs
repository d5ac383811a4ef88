//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the operations that add, update and delete expenses
//! - Filtered listing for reports and CSV export
//! - Route handlers for the expense API

mod core;
mod endpoints;
mod export;
mod query;

pub use core::{
    Expense, ExpenseFields, add_expense, create_expense_table, delete_expense, update_expense,
};
pub use endpoints::{
    create_expense_endpoint, delete_expense_endpoint, export_expenses_endpoint,
    get_report_endpoint, list_expenses_endpoint, update_expense_endpoint,
};
pub use export::export_expenses_csv;
pub use query::{ExpenseQuery, ExpenseReport, get_expense_report, list_expenses};

pub(crate) use query::query_expenses;

#[cfg(test)]
pub(crate) use core::create_expense;
