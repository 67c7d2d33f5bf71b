//! Repository layer for database operations

pub mod books;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::book::{Book, NewBook},
};

pub use query::BookListScan;

/// Persistence operations the book service relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert one record atomically; the store assigns `id` and `created_at`.
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Execute a list scan, returning at most `scan.fetch_limit()` rows newest first.
    async fn scan(&self, scan: &BookListScan) -> AppResult<Vec<Book>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the record stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a Postgres-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>, config: &DatabaseConfig) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool, config)),
        }
    }

    /// Create a repository over any book store
    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
