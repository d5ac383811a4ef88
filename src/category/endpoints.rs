//! Route handlers for categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::IdResponse,
    db::lock_connection,
    extract::{JsonBody, QueryParams},
    identity::Identity,
};

use super::{
    core::{Category, add_category, list_categories},
    suggest::suggest_category,
};

/// The state needed to manage categories.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for [suggest_category_endpoint].
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    /// The expense note to categorize.
    #[serde(default)]
    pub note: String,
}

/// A route handler for listing the caller's categories.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
    identity: Identity,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    list_categories(identity, &connection).map(Json)
}

/// A route handler for adding a category, responds with the new category's ID.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    identity: Identity,
    JsonBody(category): JsonBody<Category>,
) -> Result<(StatusCode, Json<IdResponse>), Error> {
    let connection = lock_connection(&state.db_connection)?;

    let id = add_category(identity, category, &connection)?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// A route handler that suggests a category label for an expense note.
///
/// Does not require an identity.
pub async fn suggest_category_endpoint(
    QueryParams(query): QueryParams<SuggestionQuery>,
) -> Json<&'static str> {
    Json(suggest_category(&query.note))
}
