//! In-memory document store.

use std::path::Path;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use resthal_hal::{Document, document_from_json};
use serde_json::Value;
use tracing::{debug, info};

use super::{DocumentStore, StoreError, StoreResult, id_matches};

type Collections = IndexMap<String, Vec<Document>>;

/// A document store held entirely in memory.
///
/// Databases and collections keep insertion order.
///
/// # Seed format
///
/// ```json
/// { "<db>": { "<collection>": [ { "_id": "a", "n": 1 } ] } }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    databases: RwLock<IndexMap<String, Collections>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from seed JSON.
    pub fn from_json(seed: Value) -> StoreResult<Self> {
        let store = Self::new();
        store.load_json(seed)?;
        Ok(store)
    }

    /// Creates a store from a seed file.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let seed: Value = serde_json::from_str(&text)?;
        let store = Self::from_json(seed)?;
        info!(path = %path.display(), "Loaded seed file");
        Ok(store)
    }

    /// Adds every database, collection and document in `seed`.
    pub fn load_json(&self, seed: Value) -> StoreResult<()> {
        let Value::Object(databases) = seed else {
            return Err(invalid_seed("top level must be an object of databases"));
        };

        for (db, collections) in databases {
            let Value::Object(collections) = collections else {
                return Err(invalid_seed(format!("database '{}' must be an object", db)));
            };
            self.create_database(&db);

            for (coll, documents) in collections {
                let Value::Array(documents) = documents else {
                    return Err(invalid_seed(format!(
                        "collection '{}/{}' must be an array",
                        db, coll
                    )));
                };
                self.create_collection(&db, &coll);

                for document in documents {
                    let document = document_from_json(document).ok_or_else(|| {
                        invalid_seed(format!("documents in '{}/{}' must be objects", db, coll))
                    })?;
                    self.insert(&db, &coll, document);
                }
            }
        }

        Ok(())
    }

    /// Creates a database if it does not exist.
    pub fn create_database(&self, db: &str) {
        self.databases.write().entry(db.to_string()).or_default();
    }

    /// Creates a collection (and its database) if it does not exist.
    pub fn create_collection(&self, db: &str, coll: &str) {
        self.databases
            .write()
            .entry(db.to_string())
            .or_default()
            .entry(coll.to_string())
            .or_default();
    }

    /// Appends a document, creating the database and collection as needed.
    pub fn insert(&self, db: &str, coll: &str, document: Document) {
        debug!(db = %db, coll = %coll, "Inserting document");
        self.databases
            .write()
            .entry(db.to_string())
            .or_default()
            .entry(coll.to_string())
            .or_default()
            .push(document);
    }
}

fn invalid_seed(message: impl Into<String>) -> StoreError {
    StoreError::InvalidSeed {
        message: message.into(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_collections(&self, db: &str) -> StoreResult<Option<Vec<String>>> {
        Ok(self
            .databases
            .read()
            .get(db)
            .map(|collections| collections.keys().cloned().collect()))
    }

    async fn count_documents(&self, db: &str, coll: &str) -> StoreResult<Option<usize>> {
        Ok(self
            .databases
            .read()
            .get(db)
            .and_then(|collections| collections.get(coll))
            .map(Vec::len))
    }

    async fn find_documents(
        &self,
        db: &str,
        coll: &str,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Option<Vec<Document>>> {
        Ok(self
            .databases
            .read()
            .get(db)
            .and_then(|collections| collections.get(coll))
            .map(|documents| documents.iter().skip(skip).take(limit).cloned().collect()))
    }

    async fn find_document(&self, db: &str, coll: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .databases
            .read()
            .get(db)
            .and_then(|collections| collections.get(coll))
            .and_then(|documents| documents.iter().find(|d| id_matches(d, id)).cloned()))
    }
}
