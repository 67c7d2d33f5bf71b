//! Data models for Book Tracker

pub mod book;
pub mod isbn;

// Re-export commonly used types
pub use book::{Book, BookListQuery, CreateBook, NewBook};
