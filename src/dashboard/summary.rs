//! Monthly statistics and the dashboard summary for a user.

use rusqlite::Connection;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    budget::{Budget, get_budget},
    expense::{ExpenseQuery, query_expenses},
    identity::{Identity, UserID},
};

use super::{
    aggregation::{MonthlyStats, month_bounds, monthly_stats},
    progress::{BudgetProgress, budget_progress},
};

/// Everything shown on the dashboard for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// The month being summarised as a "YYYY-MM" string.
    pub month: String,
    /// The spending in the month.
    pub stats: MonthlyStats,
    /// The budget for the month, if one has been set.
    pub budget: Option<Budget>,
    /// Spending compared to the budget, or to zero if there is no budget.
    pub progress: BudgetProgress,
}

/// The "YYYY-MM" key of the month containing `now`.
pub fn current_month(now: OffsetDateTime) -> String {
    format!("{:04}-{:02}", now.year(), u8::from(now.month()))
}

/// Summarise the caller's spending in `month`.
///
/// The most recent expenses are the newest by date. Returns `None` for anonymous callers.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_monthly_stats(
    identity: Identity,
    month: &str,
    connection: &Connection,
) -> Result<Option<MonthlyStats>, Error> {
    identity
        .user_id()
        .map(|user_id| query_monthly_stats(user_id, month, connection))
        .transpose()
}

/// Get the caller's spending, budget and budget progress for `month`.
///
/// Returns `None` for anonymous callers.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_dashboard(
    identity: Identity,
    month: &str,
    connection: &Connection,
) -> Result<Option<Dashboard>, Error> {
    let Some(user_id) = identity.user_id() else {
        return Ok(None);
    };

    let stats = query_monthly_stats(user_id, month, connection)?;
    let budget = get_budget(identity, month, connection)?;
    let budget_amount = budget.as_ref().map_or(0.0, |budget| budget.amount);
    let progress = budget_progress(stats.total_spent, budget_amount);

    Ok(Some(Dashboard {
        month: month.to_owned(),
        stats,
        budget,
        progress,
    }))
}

fn query_monthly_stats(
    user_id: UserID,
    month: &str,
    connection: &Connection,
) -> Result<MonthlyStats, Error> {
    let (start_date, end_date) = month_bounds(month);
    let query = ExpenseQuery {
        start_date: Some(start_date),
        end_date: Some(end_date),
        ..Default::default()
    };

    let expenses = query_expenses(user_id, &query, connection)?;

    Ok(monthly_stats(&expenses, month))
}
