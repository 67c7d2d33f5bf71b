//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "book tracker backend",
        version = "1.0.0",
        description = "Book records with keyword search and cursor pagination",
        license(name = "MIT"),
        contact(email = "dawid.skreczko@gmail.com")
    ),
    servers(
        (url = "/internal_api", description = "Internal API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::create_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::pagination::PaginationCursor,
            books::BookListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "book", description = "Book records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(
        SwaggerUi::new("/internal_api/docs").url("/internal_api/openapi.json", ApiDoc::openapi()),
    )
}
