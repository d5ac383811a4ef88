//! Monthly spending statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::expense::Expense;

/// The number of expenses listed in [MonthlyStats::recent_transactions].
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// A summary of the spending in one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// The sum of the amounts of the month's expenses.
    pub total_spent: f64,
    /// The amount spent in each category during the month.
    pub category_totals: HashMap<String, f64>,
    /// The number of expenses in the month.
    pub transaction_count: usize,
    /// The first few of the month's expenses, in the order they were given.
    pub recent_transactions: Vec<Expense>,
}

/// The first and last day keys of `month`, e.g. "2024-02-01" and "2024-02-31".
///
/// The bounds are compared as strings, so "-31" covers every month regardless of its length.
pub(crate) fn month_bounds(month: &str) -> (String, String) {
    (format!("{month}-01"), format!("{month}-31"))
}

/// Summarise the `expenses` dated within `month`, a "YYYY-MM" string.
///
/// Expenses outside the month are ignored. The order of `expenses` is kept, so callers decide
/// which expenses count as recent.
pub fn monthly_stats(expenses: &[Expense], month: &str) -> MonthlyStats {
    let (start, end) = month_bounds(month);
    let mut stats = MonthlyStats::default();

    for expense in expenses
        .iter()
        .filter(|expense| expense.date >= start && expense.date <= end)
    {
        stats.total_spent += expense.amount;
        *stats
            .category_totals
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount;
        stats.transaction_count += 1;

        if stats.recent_transactions.len() < RECENT_TRANSACTION_COUNT {
            stats.recent_transactions.push(expense.clone());
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{expense::Expense, identity::UserID};

    use super::{MonthlyStats, month_bounds, monthly_stats};

    fn create_test_expense(id: i64, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id,
            user_id: UserID::new(1),
            amount,
            category: category.to_owned(),
            note: String::new(),
            date: date.to_owned(),
        }
    }

    #[test]
    fn empty_input_gives_zeroed_stats() {
        let result = monthly_stats(&[], "2024-01");

        assert_eq!(result, MonthlyStats::default());
        assert_eq!(result.total_spent, 0.0);
        assert!(result.category_totals.is_empty());
        assert_eq!(result.transaction_count, 0);
        assert!(result.recent_transactions.is_empty());
    }

    #[test]
    fn only_counts_expenses_in_month() {
        let expenses = vec![
            create_test_expense(1, 10.0, "Food", "2024-01-05"),
            create_test_expense(2, 20.0, "Food", "2024-01-20"),
            create_test_expense(3, 5.0, "Food", "2024-02-01"),
        ];

        let result = monthly_stats(&expenses, "2024-01");

        assert_eq!(result.total_spent, 30.0);
        assert_eq!(
            result.category_totals,
            HashMap::from([("Food".to_owned(), 30.0)])
        );
        assert_eq!(result.transaction_count, 2);
        assert_eq!(result.recent_transactions, expenses[..2].to_vec());
    }

    #[test]
    fn sums_per_category() {
        let expenses = vec![
            create_test_expense(1, 10.0, "Food", "2024-03-01"),
            create_test_expense(2, 4.5, "Transport", "2024-03-02"),
            create_test_expense(3, 2.5, "Food", "2024-03-31"),
        ];

        let result = monthly_stats(&expenses, "2024-03");

        assert_eq!(result.total_spent, 17.0);
        assert_eq!(result.category_totals["Food"], 12.5);
        assert_eq!(result.category_totals["Transport"], 4.5);
    }

    #[test]
    fn keeps_first_five_in_given_order() {
        let expenses: Vec<Expense> = (1..=7)
            .rev()
            .map(|day| create_test_expense(day, 1.0, "Food", &format!("2024-01-{day:02}")))
            .collect();

        let result = monthly_stats(&expenses, "2024-01");

        let recent_ids: Vec<i64> = result
            .recent_transactions
            .iter()
            .map(|expense| expense.id)
            .collect();
        assert_eq!(result.transaction_count, 7);
        assert_eq!(recent_ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn month_bounds_are_string_keys() {
        assert_eq!(
            month_bounds("2024-02"),
            ("2024-02-01".to_owned(), "2024-02-31".to_owned())
        );
    }

    #[test]
    fn bounds_compare_as_strings() {
        // Not a real date, but it sorts inside the month's bounds.
        let expenses = vec![create_test_expense(1, 3.0, "Food", "2024-02-30")];

        let result = monthly_stats(&expenses, "2024-02");

        assert_eq!(result.transaction_count, 1);
    }
}
