//! Book record model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::isbn::validate_isbn;
use crate::pagination::{Keyed, DEFAULT_LIMIT};

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned identifier, strictly increasing with insertion order
    #[schema(example = 12978052)]
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Normalized ISBN-10 or ISBN-13
    #[schema(example = "9780471117094")]
    pub isbn: String,
    pub pages: i32,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Keyed for Book {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Create book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    /// Book title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    /// Book author
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    /// Valid ISBN-10 or ISBN-13 (hyphens/spaces allowed, will be normalized)
    #[validate(custom(function = "validate_isbn"))]
    #[schema(example = "978-0-471-11709-4")]
    pub isbn: String,
    /// Book total pages
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: i32,
    /// Book rating
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Validated book ready for insertion, ISBN in compact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub pages: i32,
    pub rating: i32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// List query parameters
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    /// Records to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    #[param(minimum = 1, maximum = 500, default = 20, example = 20)]
    pub limit: u32,
    /// `id` of the last record from the previous page (used as the cursor start)
    #[param(example = 12978052)]
    pub cursor_id: Option<i64>,
    /// Filter value applied to both `title` and `author`
    pub search: Option<String>,
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor_id: None,
            search: None,
        }
    }
}
