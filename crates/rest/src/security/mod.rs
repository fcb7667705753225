//! Authentication and access control.
//!
//! Security is configured from a JSON file:
//!
//! ```json
//! {
//!   "users": [
//!     { "name": "admin", "password": "changeit", "roles": ["admins"] }
//!   ],
//!   "permissions": [
//!     { "role": "admins", "path": "/" },
//!     { "role": "$unauthenticated", "methods": ["GET"], "path": "/public" }
//!   ]
//! }
//! ```
//!
//! Without a file, no security layer is installed.

pub mod access;
pub mod dispatcher;
pub mod identity;

pub use access::{AccessManager, AccessRule, SimpleAccessManager, UNAUTHENTICATED_ROLE};
pub use dispatcher::{
    AuthStrategy, ChallengeMode, SILENT_HEADER_KEY, SILENT_QUERY_PARAM_KEY, SecurityHandler,
    is_silent, security_middleware,
};
pub use identity::{Credentials, Identity, IdentityManager, SimpleIdentityManager, UserEntry};

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading security configuration.
#[derive(Error, Debug)]
pub enum SecurityConfigError {
    /// The file could not be read.
    #[error("failed to read security file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid security JSON.
    #[error("invalid security file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Users and access rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Known users.
    #[serde(default)]
    pub users: Vec<UserEntry>,
    /// Access rules.
    #[serde(default)]
    pub permissions: Vec<AccessRule>,
}

impl SecurityConfig {
    /// Parses security configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SecurityConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads security configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SecurityConfigError> {
        let path = path.as_ref();
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            users = config.users.len(),
            rules = config.permissions.len(),
            "Loaded security configuration"
        );
        Ok(config)
    }

    /// Builds a [`SecurityHandler`] from the simple managers.
    pub fn into_handler(self, realm: &str) -> SecurityHandler {
        SecurityHandler::new(
            Arc::new(SimpleIdentityManager::new(self.users)),
            Arc::new(SimpleAccessManager::new(self.permissions)),
            realm,
        )
    }
}
