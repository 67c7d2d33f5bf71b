//! Book records service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookListQuery, CreateBook, NewBook},
        isbn,
    },
    pagination::{paginate, Page},
    repository::{BookListScan, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Persist a new book. Fields are expected to be validated already; the ISBN
    /// is stored in compact form.
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let isbn = isbn::normalize(&data.isbn)
            .map_err(|e| AppError::InvalidInput(format!("isbn: {}", e)))?;

        let book = NewBook {
            title: data.title,
            author: data.author,
            isbn,
            pages: data.pages,
            rating: data.rating,
        };

        let created = self.repository.books.insert(&book).await?;
        tracing::info!(book_id = created.id, "book created");
        Ok(created)
    }

    /// One page of books, newest first, filtered by `search` and bounded by the cursor
    pub async fn list_books(&self, query: &BookListQuery) -> AppResult<Page<Book>> {
        let scan = BookListScan::from(query);
        let rows = self.repository.books.scan(&scan).await?;
        let page = paginate(rows, scan.limit);

        tracing::debug!(
            limit = scan.limit,
            cursor_id = ?scan.cursor_id,
            search = ?scan.search,
            returned = page.results.len(),
            next_cursor = ?page.next_cursor.map(|c| c.id),
            "book list page"
        );
        Ok(page)
    }

    /// Readiness probe for the backing store
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
