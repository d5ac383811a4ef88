//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}', use [format_endpoint].

use std::fmt::Display;

/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to download expenses as a CSV file.
pub const EXPORT_EXPENSES: &str = "/api/expenses/export";
/// The route for the filtered expense report with its total.
pub const REPORTS: &str = "/api/reports";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to suggest a category for an expense note.
pub const CATEGORY_SUGGESTION: &str = "/api/categories/suggestion";
/// The route for a month's spending statistics.
pub const STATS: &str = "/api/stats";
/// The route to get or set the budget for a month.
pub const BUDGET: &str = "/api/budgets/{month}";
/// The route for the dashboard summary of a month.
pub const DASHBOARD: &str = "/api/dashboard";

/// Replace the first parameter in `endpoint_path` with `param`.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, param: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        param,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::EXPORT_EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::REPORTS);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_SUGGESTION);
        assert_endpoint_is_valid_uri(endpoints::STATS);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD);

        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EXPENSE, 1));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::BUDGET, "2024-01"));
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint("/hello/{month}", "2024-01");

        assert_eq!(formatted_path, "/hello/2024-01");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
