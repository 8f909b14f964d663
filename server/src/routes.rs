use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use libris_core::record::{Document, Record, RecordId};

use crate::error::ApiError;
use crate::state::AppState;

/// One route per store operation; no validation of the document body at
/// this layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .with_state(state)
}

async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.books.list().await?;
    Ok(Json(records))
}

async fn create_book(State(state): State<AppState>, Json(fields): Json<Document>) -> Result<Json<Record>, ApiError> {
    let record = state.books.insert(fields).await?;
    Ok(Json(record))
}

async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<Record>, ApiError> {
    let id: RecordId = id.parse().map_err(|_| ApiError::InvalidId)?;
    let record = state.books.replace(id, fields).await?;
    Ok(Json(record))
}

async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Record>, ApiError> {
    let id: RecordId = id.parse().map_err(|_| ApiError::InvalidId)?;
    let record = state.books.remove(id).await?;
    Ok(Json(record))
}
