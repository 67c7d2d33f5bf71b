//! Keyset pagination over a descending, strictly monotonic key.
//!
//! A page is produced from a scan that over-fetches exactly one row beyond the
//! requested limit. When that extra row comes back more records exist, and the key
//! of the last row kept on the page becomes the cursor for the next request. The
//! next scan is bounded by `key < cursor`, so a traversal never repeats or skips a
//! row of a static store, and rows inserted later (always with larger keys) never
//! shift the pages that are still ahead of the cursor.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when the request does not specify one
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest accepted page size
pub const MAX_LIMIT: u32 = 500;

/// A row carrying the pagination key.
pub trait Keyed {
    fn key(&self) -> i64;
}

/// Continuation token: the key of the last row on the previous page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationCursor {
    /// `id` of the last record from the previous page (used as the cursor start)
    #[schema(example = 12978052)]
    pub id: i64,
}

/// One page of results plus the cursor for the following page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<PaginationCursor>,
}

/// Number of rows a scan must return for a page of `limit` rows.
pub fn fetch_size(limit: u32) -> i64 {
    i64::from(limit) + 1
}

/// Turn the over-fetched rows of a scan into a page.
///
/// `rows` must be ordered by descending key and hold at most `limit + 1` rows.
pub fn paginate<T: Keyed>(mut rows: Vec<T>, limit: u32) -> Page<T> {
    debug_assert!(rows.windows(2).all(|w| w[0].key() > w[1].key()));

    let limit = limit as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    let next_cursor = if has_more {
        rows.last().map(|row| PaginationCursor { id: row.key() })
    } else {
        None
    };

    Page {
        results: rows,
        next_cursor,
    }
}
