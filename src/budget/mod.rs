//! Monthly spending budgets.

mod core;
mod endpoints;

pub use core::{Budget, create_budget_table, get_budget, set_budget};
pub use endpoints::{get_budget_endpoint, set_budget_endpoint};
