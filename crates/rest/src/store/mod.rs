//! Document store abstraction.
//!
//! The REST layer reads records through [`DocumentStore`]. Real drivers live
//! outside this crate; [`memory::InMemoryStore`] backs development servers
//! and tests.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use resthal_hal::{Document, identifier_string};
use thiserror::Error;

/// Errors raised by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not serve the request.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Backend-provided description.
        message: String,
    },

    /// Seed data did not have the expected shape.
    #[error("invalid seed data: {message}")]
    InvalidSeed {
        /// What was wrong with the seed.
        message: String,
    },

    /// Reading a seed file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A seed file was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to databases, collections and documents.
///
/// Every lookup returns `Ok(None)` when the addressed database or collection
/// does not exist, so handlers can answer 404 without inspecting errors.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Lists the collections of a database.
    async fn list_collections(&self, db: &str) -> StoreResult<Option<Vec<String>>>;

    /// Counts the documents of a collection.
    async fn count_documents(&self, db: &str, coll: &str) -> StoreResult<Option<usize>>;

    /// Reads one page of a collection, in storage order.
    async fn find_documents(
        &self,
        db: &str,
        coll: &str,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Option<Vec<Document>>>;

    /// Reads one document by the string form of its `_id`.
    async fn find_document(&self, db: &str, coll: &str, id: &str) -> StoreResult<Option<Document>>;
}

/// Returns true if `document`'s identifier renders as `id`.
///
/// Uses the same identifier rules as embedded `self` links, so every item
/// link of a collection page resolves to its document.
pub fn id_matches(document: &Document, id: &str) -> bool {
    identifier_string(document).as_deref() == Some(id)
}
