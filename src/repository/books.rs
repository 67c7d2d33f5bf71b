//! Books repository backed by Postgres

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};

use super::{query::BookListScan, BookStore};
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
    force_index_search: bool,
    explain_queries: bool,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            force_index_search: config.force_index_search,
            explain_queries: config.explain_queries,
        }
    }

    /// Steer the planner to a bitmap scan over the trigram GIN indexes.
    /// `SET LOCAL` lasts until the end of the transaction only.
    async fn prefer_index_scan(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
        sqlx::query("SET LOCAL enable_seqscan = OFF")
            .execute(&mut **tx)
            .await?;
        sqlx::query("SET LOCAL enable_indexscan = OFF")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Log the execution plan of a list scan
    async fn explain(tx: &mut Transaction<'_, Postgres>, scan: &BookListScan) -> AppResult<()> {
        let mut builder = scan.to_explain_query();
        let plan: Vec<String> = builder
            .build_query_scalar()
            .fetch_all(&mut **tx)
            .await?;
        tracing::debug!(plan = %plan.join("\n"), "book list plan");
        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, pages, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, isbn, pages, rating, created_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.pages)
        .bind(book.rating)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await.map_err(|e| {
                    tracing::error!(error = %e, "book insert commit failed");
                    AppError::Storage("Failed to create book".to_string())
                })?;
                Ok(row)
            }
            Err(e) => {
                tracing::error!(error = %e, "book insert failed, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(error = %rollback, "book insert rollback failed");
                }
                Err(AppError::Storage("Failed to create book".to_string()))
            }
        }
    }

    async fn scan(&self, scan: &BookListScan) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;

        if self.force_index_search && scan.prefers_index_scan() {
            Self::prefer_index_scan(&mut tx).await?;
        }

        if self.explain_queries {
            Self::explain(&mut tx, scan).await?;
        }

        let mut builder = scan.to_query();
        let rows = builder
            .build_query_as::<Book>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
