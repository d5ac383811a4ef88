//! Route handlers for monthly budgets.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::IdResponse,
    db::lock_connection,
    extract::{JsonBody, PathParam},
    identity::Identity,
};

use super::core::{Budget, get_budget, set_budget};

/// The state needed to manage budgets.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for setting a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetAmount {
    /// The planned spending for the month.
    pub amount: f64,
}

/// A route handler for getting the caller's budget for a month, responds with `null` if there is
/// no budget.
pub async fn get_budget_endpoint(
    State(state): State<BudgetState>,
    identity: Identity,
    PathParam(month): PathParam<String>,
) -> Result<Json<Option<Budget>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_budget(identity, &month, &connection).map(Json)
}

/// A route handler for creating or replacing the caller's budget for a month, responds with the
/// budget's ID.
pub async fn set_budget_endpoint(
    State(state): State<BudgetState>,
    identity: Identity,
    PathParam(month): PathParam<String>,
    JsonBody(body): JsonBody<BudgetAmount>,
) -> Result<Json<IdResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let budget = set_budget(identity, &month, body.amount, &connection)?;

    Ok(Json(IdResponse { id: budget.id }))
}

#[cfg(test)]
mod endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        extract::{JsonBody, PathParam},
        identity::{Identity, UserID},
    };

    use super::{BudgetAmount, BudgetState, get_budget_endpoint, set_budget_endpoint};

    fn get_test_state() -> BudgetState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize(&connection).expect("could not initialize test DB");

        BudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_set_then_get_budget() {
        let state = get_test_state();
        let identity = Identity::User(UserID::new(1));

        let Json(first) = set_budget_endpoint(
            State(state.clone()),
            identity,
            PathParam("2024-01".to_owned()),
            JsonBody(BudgetAmount { amount: 100.0 }),
        )
        .await
        .expect("could not set budget");
        let Json(second) = set_budget_endpoint(
            State(state.clone()),
            identity,
            PathParam("2024-01".to_owned()),
            JsonBody(BudgetAmount { amount: 150.0 }),
        )
        .await
        .expect("could not set budget");
        let Json(budget) =
            get_budget_endpoint(State(state), identity, PathParam("2024-01".to_owned()))
                .await
                .unwrap();

        assert_eq!(first, second);
        let budget = budget.expect("budget should exist");
        assert_eq!(budget.id, first.id);
        assert_eq!(budget.amount, 150.0);
    }

    #[tokio::test]
    async fn get_missing_budget_is_none() {
        let state = get_test_state();

        let Json(budget) = get_budget_endpoint(
            State(state),
            Identity::User(UserID::new(1)),
            PathParam("2024-01".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(budget, None);
    }

    #[tokio::test]
    async fn set_budget_requires_identity() {
        let state = get_test_state();

        let result = set_budget_endpoint(
            State(state),
            Identity::Anonymous,
            PathParam("2024-01".to_owned()),
            JsonBody(BudgetAmount { amount: 100.0 }),
        )
        .await;

        assert_eq!(result.err(), Some(Error::Unauthenticated));
    }
}
