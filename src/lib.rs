//! Spendwise is a personal expense and budget tracker.
//!
//! Users log expenses, categorize them, set monthly budgets, and view aggregate
//! spending. This library provides a JSON API over a SQLite database. Users are
//! identified by an encrypted cookie issued by an external log-in service.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod budget;
mod category;
mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod expense;
mod extract;
mod identity;
mod logging;
mod routing;

pub use app_state::{AppState, create_cookie_key};
pub use budget::{Budget, get_budget, set_budget};
pub use category::{
    Category, add_category, default_categories, list_categories, suggest_category,
};
pub use dashboard::{
    BudgetProgress, BudgetStatus, Dashboard, MonthlyStats, budget_progress, current_month,
    get_dashboard, get_monthly_stats, monthly_stats,
};
pub use database_id::{BudgetId, CategoryId, DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use expense::{
    Expense, ExpenseFields, ExpenseQuery, ExpenseReport, add_expense, delete_expense,
    export_expenses_csv, get_expense_report, list_expenses, update_expense,
};
pub use identity::{
    DEFAULT_COOKIE_DURATION, Identity, UserID, clear_identity_cookie, set_identity_cookie,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_BUFFERED_BODY_BYTES, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid identity.
    ///
    /// Mutations fail with this error. Queries return an empty result for
    /// anonymous callers instead.
    #[error("not authenticated")]
    Unauthenticated,

    /// The expense does not exist, or it belongs to a different user.
    #[error("expense not found or unauthorized")]
    NotFoundOrUnauthorized,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request body, query string or path could not be parsed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body was larger than the server will buffer.
    #[error("request body is too large")]
    PayloadTooLarge,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The CSV export could not be written.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::NotFoundOrUnauthorized | Error::NotFound => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
