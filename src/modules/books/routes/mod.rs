//! HTTP handlers for the books module

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bookshelf_http::AppError;
use serde_json::{json, Value};

use super::models::{Book, BookFilter, BookPayload};
use super::repository::BookRepository;
use crate::utils::{parse_object, CreatePayload};

pub fn router(repository: BookRepository) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(repository)
}

async fn list_books(
    State(repository): State<BookRepository>,
    Query(filter): Query<BookFilter>,
) -> Result<Json<Vec<Book>>, AppError> {
    repository.list(filter).await.map(Json)
}

async fn get_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    repository.get(&id).await.map(Json)
}

/// Object bodies take the checked single path (201), arrays the bulk path (200).
async fn create_book(
    State(repository): State<BookRepository>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(json_rejection)?;

    match CreatePayload::<BookPayload>::from_json(body, "book")? {
        CreatePayload::Bulk(payloads) => {
            let books = repository.bulk_create(payloads).await?;
            Ok(Json(books).into_response())
        }
        CreatePayload::Single(payload) => {
            let book = repository.create(payload).await?;
            Ok((StatusCode::CREATED, Json(book)).into_response())
        }
    }
}

async fn update_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(body) = body.map_err(json_rejection)?;
    let payload = parse_object::<BookPayload>(body, "book")?;

    repository.update(&id, payload).await.map(Json)
}

async fn delete_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    repository.delete(&id).await?;
    Ok(Json(json!({ "message": "Book successfully deleted" })))
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}
