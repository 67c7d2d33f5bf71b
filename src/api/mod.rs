//! API handlers for Book Tracker REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request, State},
    http::{request::Parts, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{config::CorsConfig, error::AppError, AppState};

/// Prefix shared by every route
pub const API_PREFIX: &str = "/internal_api";

/// JSON body extractor that also runs `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string extractor that also runs `validator` rules
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Gate for the documentation routes: HTTP Basic against the configured static credentials
pub async fn require_docs_credentials(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let docs = &state.config.docs;
    match credentials {
        Some(TypedHeader(Authorization(basic)))
            if basic.username() == docs.username && basic.password() == docs.password =>
        {
            Ok(next.run(request).await)
        }
        Some(TypedHeader(Authorization(basic))) => {
            tracing::warn!(username = basic.username(), "rejected documentation credentials");
            Err(AppError::Authentication("Invalid credentials".to_string()))
        }
        None => Err(AppError::Authentication("Missing credentials".to_string())),
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/book", get(books::list_books))
        .route("/book/create", post(books::create_book))
        .with_state(state.clone());

    // OpenAPI documentation behind the static credential gate
    let docs = openapi::create_openapi_router().layer(middleware::from_fn_with_state(
        state.clone(),
        require_docs_credentials,
    ));

    Router::new()
        .nest(API_PREFIX, api)
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors))
}
