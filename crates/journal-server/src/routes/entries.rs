//! Journal entry routes.
//!
//! - GET/POST/DELETE /entries - List, create, delete all
//! - GET/PUT/DELETE /entries/{id} - Single entry operations
//! - POST /entries/{id}/analyze - LLM sentiment/summary analysis

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use journal_core::{AnalysisResult, Entry, EntryPatch, NewEntry};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Create entries router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/entries",
            get(list_entries).post(create_entry).delete(delete_all_entries),
        )
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/{id}/analyze", post(analyze_entry))
}

/// Create a new entry
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(req) = payload?;
    let entry = state.entries.create(req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List all entries
pub async fn list_entries(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.entries.list().await?))
}

/// Get a single entry
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    state
        .entries
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Entry".to_string()))
}

/// Update an entry
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<EntryPatch>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Json(req) = payload?;
    state
        .entries
        .update(&id, req)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Entry".to_string()))
}

/// Delete an entry
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.entries.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete all entries
pub async fn delete_all_entries(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.entries.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Analyze an entry
pub async fn analyze_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    state
        .entries
        .analyze(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Entry".to_string()))
}
