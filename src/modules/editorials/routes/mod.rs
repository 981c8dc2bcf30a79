//! HTTP handlers for the editorials module

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bookshelf_http::AppError;
use serde_json::{json, Value};

use super::models::{Editorial, EditorialFilter, EditorialPayload};
use super::repository::EditorialRepository;
use crate::utils::CreatePayload;

pub fn router(repository: EditorialRepository) -> Router {
    Router::new()
        .route("/", get(list_editorials).post(create_editorial))
        .route("/{id}", get(get_editorial).delete(delete_editorial))
        .with_state(repository)
}

async fn list_editorials(
    State(repository): State<EditorialRepository>,
    Query(filter): Query<EditorialFilter>,
) -> Result<Json<Vec<Editorial>>, AppError> {
    repository.list(filter).await.map(Json)
}

async fn get_editorial(
    State(repository): State<EditorialRepository>,
    Path(id): Path<String>,
) -> Result<Json<Editorial>, AppError> {
    repository.get(&id).await.map(Json)
}

/// Object bodies take the checked single path (201), arrays the bulk path (200).
async fn create_editorial(
    State(repository): State<EditorialRepository>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    match CreatePayload::<EditorialPayload>::from_json(body, "editorial")? {
        CreatePayload::Bulk(payloads) => {
            let editorials = repository.bulk_create(payloads).await?;
            Ok(Json(editorials).into_response())
        }
        CreatePayload::Single(payload) => {
            let editorial = repository.create(payload).await?;
            Ok((StatusCode::CREATED, Json(editorial)).into_response())
        }
    }
}

async fn delete_editorial(
    State(repository): State<EditorialRepository>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    repository.delete(&id).await?;
    Ok(Json(json!({ "message": "Editorial successfully deleted" })))
}
