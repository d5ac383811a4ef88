//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use crate::{
    AppState, Error,
    budget::{get_budget_endpoint, set_budget_endpoint},
    category::{create_category_endpoint, list_categories_endpoint, suggest_category_endpoint},
    dashboard::{get_dashboard_endpoint, get_stats_endpoint},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, export_expenses_endpoint,
        get_report_endpoint, list_expenses_endpoint, update_expense_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route resolves the caller from the identity cookie. Queries answer anonymous callers
/// with empty results and mutations reject them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY_SUGGESTION,
            get(suggest_category_endpoint),
        )
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EXPORT_EXPENSES, get(export_expenses_endpoint))
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(endpoints::REPORTS, get(get_report_endpoint))
        .route(endpoints::STATS, get(get_stats_endpoint))
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint).put(set_budget_endpoint),
        )
        .route(endpoints::DASHBOARD, get(get_dashboard_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
