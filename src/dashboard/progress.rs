//! Progress of a month's spending against its budget.

use serde::Serialize;

/// How close spending is to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatus {
    /// At most 70% of the budget is spent.
    OnTrack,
    /// More than 70% and at most 90% of the budget is spent.
    Warning,
    /// More than 90% of the budget is spent.
    Critical,
}

/// Spending compared to a budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    /// The amount spent.
    pub spent: f64,
    /// The budgeted amount, zero if there is no budget.
    pub budget: f64,
    /// The budget minus the amount spent, negative when over budget.
    pub remaining: f64,
    /// The amount spent as a percentage of the budget. May exceed 100.
    pub percentage_used: f64,
    /// The status derived from `percentage_used`.
    pub status: BudgetStatus,
}

const WARNING_PERCENTAGE: f64 = 70.0;
const CRITICAL_PERCENTAGE: f64 = 90.0;

/// Compare the amount `spent` to a `budget`.
///
/// A budget of zero or less has a percentage used of zero.
pub fn budget_progress(spent: f64, budget: f64) -> BudgetProgress {
    let percentage_used = if budget > 0.0 {
        spent / budget * 100.0
    } else {
        0.0
    };

    let status = match percentage_used.min(100.0) {
        percentage if percentage > CRITICAL_PERCENTAGE => BudgetStatus::Critical,
        percentage if percentage > WARNING_PERCENTAGE => BudgetStatus::Warning,
        _ => BudgetStatus::OnTrack,
    };

    BudgetProgress {
        spent,
        budget,
        remaining: budget - spent,
        percentage_used,
        status,
    }
}
