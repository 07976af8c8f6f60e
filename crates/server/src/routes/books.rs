use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::db::book_service::{self, BookInput, SortKey};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Sort field: title, author or price (case-insensitive). Anything else
    /// falls back to title.
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[utoipa::path(
    get, path = "/Books", tag = "books",
    params(ListQuery),
    responses((status = 200, description = "All books, ascending by the resolved sort field"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::book::Model>>, ApiError> {
    let sort = SortKey::resolve(q.sort_by.as_deref());
    let books = book_service::list_books(&state.db, sort).await?;
    info!(count = books.len(), "list books");
    Ok(Json(books))
}

#[utoipa::path(
    get, path = "/Books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::book::Model>, ApiError> {
    match book_service::get_book(&state.db, id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::book_not_found()),
    }
}

#[utoipa::path(
    post, path = "/Books", tag = "books",
    request_body = crate::openapi::BookInputDoc,
    responses(
        (status = 201, description = "Created; Location points at the new book"),
        (status = 400, description = "Validation errors as a JSON array")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Json(input): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = book_service::create_book(&state.db, &input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created.id),
    ))
}

#[utoipa::path(
    put, path = "/Books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = crate::openapi::BookInputDoc,
    responses(
        (status = 200, description = "Success"),
        (status = 400, description = "Validation errors as a JSON array")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(patch): Json<BookInput>,
) -> Result<Json<&'static str>, ApiError> {
    book_service::update_book(&state.db, id, &patch).await?;
    Ok(Json("Success"))
}

#[utoipa::path(
    delete, path = "/Books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<&'static str>, ApiError> {
    if book_service::delete_book(&state.db, id).await? {
        Ok(Json("Success"))
    } else {
        Err(ApiError::book_not_found())
    }
}
