//! Route handlers for expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::{ExpenseId, IdResponse},
    db::lock_connection,
    extract::{JsonBody, PathParam, QueryParams},
    identity::Identity,
};

use super::{
    core::{Expense, ExpenseFields, add_expense, delete_expense, update_expense},
    export::export_expenses_csv,
    query::{ExpenseQuery, ExpenseReport, get_expense_report, list_expenses},
};

/// The state needed to manage expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing the caller's expenses, newest first.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    QueryParams(query): QueryParams<ExpenseQuery>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    list_expenses(identity, &query, &connection).map(Json)
}

/// A route handler for the filtered expense report.
pub async fn get_report_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    QueryParams(query): QueryParams<ExpenseQuery>,
) -> Result<Json<ExpenseReport>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_expense_report(identity, &query, &connection).map(Json)
}

/// A route handler for recording a new expense, responds with the new expense's ID.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    JsonBody(fields): JsonBody<ExpenseFields>,
) -> Result<(StatusCode, Json<IdResponse>), Error> {
    let connection = lock_connection(&state.db_connection)?;

    let id = add_expense(identity, fields, &connection)?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// A route handler for replacing the fields of an expense.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    PathParam(expense_id): PathParam<ExpenseId>,
    JsonBody(fields): JsonBody<ExpenseFields>,
) -> Result<Json<IdResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let id = update_expense(identity, expense_id, fields, &connection)?;

    Ok(Json(IdResponse { id }))
}

/// A route handler for deleting an expense.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    PathParam(expense_id): PathParam<ExpenseId>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_expense(identity, expense_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for downloading the caller's expenses as a CSV file.
///
/// Takes the same filters as [list_expenses_endpoint].
pub async fn export_expenses_endpoint(
    State(state): State<ExpenseState>,
    identity: Identity,
    QueryParams(query): QueryParams<ExpenseQuery>,
) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let csv = export_expenses_csv(identity, &query, &connection)?;
    let filename = format!("expenses-{}.csv", OffsetDateTime::now_utc().date());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
