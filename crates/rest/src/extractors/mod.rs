//! Axum extractors.
//!
//! - [`Pagination`] - Extract `page` and `pagesize` parameters

mod pagination;

pub use pagination::Pagination;
