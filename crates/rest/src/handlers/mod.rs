//! HTTP request handlers.
//!
//! - [`database`] - Collections of a database
//! - [`collection`] - A page of documents
//! - [`document`] - A single document
//! - [`health`] - Health check endpoint

pub mod collection;
pub mod database;
pub mod document;
pub mod health;

pub use collection::collection_handler;
pub use database::database_handler;
pub use document::document_handler;
pub use health::health_handler;

use resthal_hal::DocumentValue;

use crate::state::AppState;
use crate::store::DocumentStore;

/// Absolute URL of a request path.
fn resource_url<S: DocumentStore>(state: &AppState<S>, path: &str) -> String {
    format!("{}{}", state.base_url(), path)
}

/// Drops the last segment of a path.
fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn count_value(count: usize) -> DocumentValue {
    DocumentValue::Long(i64::try_from(count).unwrap_or(i64::MAX))
}
