//! Expense categories and category suggestions.

mod core;
mod endpoints;
mod suggest;

pub use core::{Category, add_category, create_category_table, default_categories, list_categories};
pub use endpoints::{
    create_category_endpoint, list_categories_endpoint, suggest_category_endpoint,
};
pub use suggest::suggest_category;
