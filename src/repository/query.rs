//! Parameters and SQL for scanning one page of the book list.

use sqlx::{Postgres, QueryBuilder};

use crate::{
    models::book::{Book, BookListQuery},
    pagination::fetch_size,
};

const BOOK_COLUMNS: &str = "id, title, author, isbn, pages, rating, created_at";

/// Bounded scan over `books`, newest first.
///
/// Matches rows whose title or author contains `search` (case-insensitive) and
/// whose id is strictly below `cursor_id`, capped at `limit + 1` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListScan {
    pub limit: u32,
    pub cursor_id: Option<i64>,
    pub search: Option<String>,
}

impl BookListScan {
    pub fn new(limit: u32, cursor_id: Option<i64>, search: Option<&str>) -> Self {
        Self {
            limit,
            cursor_id,
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Rows the store must return: one more than the page size.
    pub fn fetch_limit(&self) -> i64 {
        fetch_size(self.limit)
    }

    /// Whether the store should steer the planner to the trigram indexes.
    pub fn prefers_index_scan(&self) -> bool {
        self.search.is_some()
    }

    /// `ILIKE` pattern for the search term, LIKE wildcards in the term escaped.
    pub fn pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Render the scan as a parameterized Postgres statement.
    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        self.build("")
    }

    /// Same statement wrapped in `EXPLAIN ANALYZE`.
    pub fn to_explain_query(&self) -> QueryBuilder<'static, Postgres> {
        self.build("EXPLAIN (ANALYZE, BUFFERS, FORMAT TEXT) ")
    }

    fn build(&self, prefix: &str) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("{}SELECT {} FROM books", prefix, BOOK_COLUMNS));
        let mut keyword = " WHERE ";

        if let Some(pattern) = self.pattern() {
            builder
                .push(keyword)
                .push("(title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR author ILIKE ")
                .push_bind(pattern)
                .push(")");
            keyword = " AND ";
        }

        if let Some(cursor_id) = self.cursor_id {
            builder.push(keyword).push("id < ").push_bind(cursor_id);
        }

        builder
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(self.fetch_limit());
        builder
    }

    /// Whether `book` satisfies the scan predicate.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(cursor_id) = self.cursor_id {
            if book.id >= cursor_id {
                return false;
            }
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                book.title.to_lowercase().contains(&term) || book.author.to_lowercase().contains(&term)
            }
            None => true,
        }
    }

    /// Evaluate the scan over an in-memory collection.
    pub fn select<'a>(&self, books: impl IntoIterator<Item = &'a Book>) -> Vec<Book> {
        let mut rows: Vec<Book> = books.into_iter().filter(|b| self.matches(b)).cloned().collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(self.fetch_limit() as usize);
        rows
    }
}

impl From<&BookListQuery> for BookListScan {
    fn from(query: &BookListQuery) -> Self {
        Self::new(query.limit, query.cursor_id, query.search.as_deref())
    }
}
