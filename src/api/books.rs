//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::{ValidatedJson, ValidatedQuery};
use crate::{
    error::{AppResult, ErrorResponse},
    models::book::{Book, BookListQuery, CreateBook},
    pagination::{Page, PaginationCursor},
};

/// One page of books plus the cursor for the next one
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub results: Vec<Book>,
    /// Absent when this is the last page
    pub next_cursor: Option<PaginationCursor>,
}

impl From<Page<Book>> for BookListResponse {
    fn from(page: Page<Book>) -> Self {
        Self {
            results: page.results,
            next_cursor: page.next_cursor,
        }
    }
}

/// List books with pagination and search
///
/// Books ordered from newest to oldest, with search and cursor pagination.
#[utoipa::path(
    get,
    path = "/book",
    tag = "book",
    params(BookListQuery),
    responses(
        (status = 200, description = "One page of books", body = BookListResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<BookListQuery>,
) -> AppResult<Json<BookListResponse>> {
    let page = state.services.books.list_books(&query).await?;
    Ok(Json(page.into()))
}

/// Create a new book entry
///
/// Adds a new book with validated ISBN, page count, and rating (1–5).
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "book",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created"),
        (status = 422, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Failed to create book", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<StatusCode> {
    state.services.books.create_book(data).await?;
    Ok(StatusCode::CREATED)
}
