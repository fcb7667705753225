//! Pagination extractor.
//!
//! Extracts `page` (1-based) and `pagesize` from the query string, applying
//! the configured default and maximum page size.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::RestError;
use crate::state::AppState;
use crate::store::DocumentStore;

/// Axum extractor for pagination parameters.
///
/// # Example
///
/// ```rust,ignore
/// use resthal_rest::extractors::Pagination;
///
/// async fn list_handler(pagination: Pagination) {
///     let skip = pagination.skip();
///     let limit = pagination.pagesize();
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    pagesize: usize,
}

#[derive(Debug, Deserialize)]
struct PaginationQuery {
    page: Option<usize>,
    pagesize: Option<usize>,
}

impl Pagination {
    /// Creates a new Pagination; `pagesize` is capped at `max_pagesize`.
    pub fn new(page: usize, pagesize: usize, max_pagesize: usize) -> Self {
        Self {
            page: page.max(1),
            pagesize: pagesize.min(max_pagesize).max(1),
        }
    }

    /// Returns the page number (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn pagesize(&self) -> usize {
        self.pagesize
    }

    /// Returns the number of documents before this page.
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.pagesize)
    }

    /// Returns the number of pages needed for `total` documents.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.pagesize)
    }

    /// Returns the next page, if `total` documents extend past this one.
    pub fn next_page(&self, total: usize) -> Option<Self> {
        (self.page < self.total_pages(total)).then(|| Self {
            page: self.page + 1,
            ..*self
        })
    }

    /// Returns the previous page.
    pub fn prev_page(&self) -> Option<Self> {
        (self.page > 1).then(|| Self {
            page: self.page - 1,
            ..*self
        })
    }

    /// Returns the first page with the same size.
    pub fn first_page(&self) -> Self {
        Self { page: 1, ..*self }
    }

    /// Renders this page as a query string.
    pub fn to_query(&self) -> String {
        format!("page={}&pagesize={}", self.page, self.pagesize)
    }
}

impl<S> FromRequestParts<AppState<S>> for Pagination
where
    S: DocumentStore + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Invalid pagination parameters: {}", e.body_text()),
            })?;

        if query.page == Some(0) {
            return Err(RestError::BadRequest {
                message: "page must be >= 1".to_string(),
            });
        }
        if query.pagesize == Some(0) {
            return Err(RestError::BadRequest {
                message: "pagesize must be >= 1".to_string(),
            });
        }

        Ok(Pagination::new(
            query.page.unwrap_or(1),
            query.pagesize.unwrap_or(state.default_page_size()),
            state.max_page_size(),
        ))
    }
}
