//! Shared fixtures: an in-memory book store and helpers to drive the router.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use book_tracker::{
    api,
    error::{AppError, AppResult},
    models::{Book, NewBook},
    repository::{BookListScan, BookStore, Repository},
    services::Services,
    AppConfig, AppState,
};

pub const SORTED_BOOKS_COUNT: usize = 20;

/// Book store keeping rows in insertion order; ids start at 1.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
    fail_inserts: AtomicBool,
}

impl MemoryBookStore {
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Failed to create book".to_string()));
        }

        let mut books = self.books.write().await;
        let row = Book {
            id: books.last().map_or(1, |b| b.id + 1),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            pages: book.pages,
            rating: book.rating,
            created_at: Utc::now(),
        };
        books.push(row.clone());
        Ok(row)
    }

    async fn scan(&self, scan: &BookListScan) -> AppResult<Vec<Book>> {
        Ok(scan.select(self.books.read().await.iter()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryBookStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryBookStore::default());
        let repository = Repository::with_store(store.clone());
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(repository)),
        };
        Self {
            router: api::create_router(state),
            store,
        }
    }

    /// Insert `count` books; `overrides` may replace title/author per index.
    /// Returns the created books newest first.
    pub async fn bulk_create_books(
        &self,
        count: usize,
        overrides: &[(Option<String>, Option<String>)],
    ) -> Vec<Book> {
        let mut created = Vec::with_capacity(count);
        for index in 0..count {
            let mut book = fake_book(index);
            if let Some((title, author)) = overrides.get(index) {
                if let Some(title) = title {
                    book.title = title.clone();
                }
                if let Some(author) = author {
                    book.author = author.clone();
                }
            }
            created.push(self.store.insert(&book).await.expect("insert"));
        }
        created.sort_by(|a, b| b.id.cmp(&a.id));
        created
    }

    pub async fn sorted_books(&self) -> Vec<Book> {
        self.bulk_create_books(SORTED_BOOKS_COUNT, &[]).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

pub fn fake_book(index: usize) -> NewBook {
    NewBook {
        title: format!("Generated title {}", index),
        author: format!("Generated author {}", index),
        isbn: "9788375780635".to_string(),
        pages: 100 + index as i32,
        rating: (index % 5) as i32 + 1,
    }
}

pub fn fake_book_json() -> Value {
    serde_json::json!({
        "title": "The Cyberiad",
        "author": "Stanislaw Lem",
        "isbn": "978-0-471-11709-4",
        "pages": 295,
        "rating": 5
    })
}

/// Percent-encode a query value.
pub fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|b| b["id"].as_i64().expect("id"))
        .collect()
}
