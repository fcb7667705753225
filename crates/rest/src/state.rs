//! Application state for the REST API.
//!
//! Holds the document store, configuration and the HAL assembler shared by
//! every handler.

use std::sync::Arc;

use resthal_hal::HalAssembler;

use crate::config::ServerConfig;
use crate::store::DocumentStore;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The store type (must implement [`DocumentStore`])
///
/// # Example
///
/// ```rust,ignore
/// use resthal_rest::{AppState, ServerConfig, store::InMemoryStore};
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(InMemoryStore::new()), ServerConfig::default());
/// ```
pub struct AppState<S> {
    store: Arc<S>,
    config: Arc<ServerConfig>,
    base_url: Arc<str>,
    assembler: HalAssembler,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            base_url: Arc::clone(&self.base_url),
            assembler: self.assembler,
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        let assembler = HalAssembler::with_max_depth(config.max_nesting_depth);
        let base_url = Arc::from(config.normalized_base_url());
        Self {
            store,
            config: Arc::new(config),
            base_url,
            assembler,
        }
    }

    /// Returns a reference to the document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the normalized base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the HAL assembler configured with the nesting bound.
    pub fn assembler(&self) -> &HalAssembler {
        &self.assembler
    }

    /// Returns the default page size.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the maximum page size.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }
}
