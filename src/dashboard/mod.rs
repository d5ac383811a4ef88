//! Dashboard module
//!
//! Summarises a user's spending for a month and compares it to the month's budget.

mod aggregation;
mod handlers;
mod progress;
mod summary;

pub use aggregation::{MonthlyStats, monthly_stats};
pub use handlers::{get_dashboard_endpoint, get_stats_endpoint};
pub use progress::{BudgetProgress, BudgetStatus, budget_progress};
pub use summary::{Dashboard, current_month, get_dashboard, get_monthly_stats};
