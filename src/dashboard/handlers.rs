//! Route handlers for monthly statistics and the dashboard.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{AppState, Error, db::lock_connection, extract::QueryParams, identity::Identity};

use super::{
    aggregation::MonthlyStats,
    summary::{Dashboard, current_month, get_dashboard, get_monthly_stats},
};

/// The state needed for the dashboard and statistics.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for [get_stats_endpoint].
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// The month to summarise as a "YYYY-MM" string.
    pub month: String,
}

/// The query string for [get_dashboard_endpoint].
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month to summarise, defaults to the current month in UTC.
    pub month: Option<String>,
}

/// A route handler for a month's spending statistics, responds with `null` for anonymous callers.
pub async fn get_stats_endpoint(
    State(state): State<DashboardState>,
    identity: Identity,
    QueryParams(query): QueryParams<StatsQuery>,
) -> Result<Json<Option<MonthlyStats>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_monthly_stats(identity, &query.month, &connection).map(Json)
}

/// A route handler for the dashboard summary, responds with `null` for anonymous callers.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
    identity: Identity,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> Result<Json<Option<Dashboard>>, Error> {
    let month = query
        .month
        .filter(|month| !month.is_empty())
        .unwrap_or_else(|| current_month(OffsetDateTime::now_utc()));
    let connection = lock_connection(&state.db_connection)?;

    get_dashboard(identity, &month, &connection).map(Json)
}
