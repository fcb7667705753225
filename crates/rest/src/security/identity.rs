//! Identity verification.

use std::collections::HashMap;

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User name.
    pub name: String,
    /// Roles granted to the user.
    pub roles: Vec<String>,
}

/// Credentials presented with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Outcome of reading the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentedCredentials {
    /// No `Authorization` header.
    Absent,
    /// A well-formed Basic header.
    Basic(Credentials),
    /// A header that is not valid Basic authentication.
    Malformed,
}

impl PresentedCredentials {
    /// Reads Basic credentials from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return PresentedCredentials::Absent;
        };

        value
            .to_str()
            .ok()
            .and_then(parse_basic)
            .map(PresentedCredentials::Basic)
            .unwrap_or(PresentedCredentials::Malformed)
    }
}

fn parse_basic(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Verifies credentials and resolves them to an identity.
pub trait IdentityManager: Send + Sync {
    /// Returns the identity for valid credentials, `None` otherwise.
    fn verify(&self, credentials: &Credentials) -> Option<Identity>;
}

/// A configured user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    /// User name.
    pub name: String,
    /// Password.
    pub password: String,
    /// Roles granted to the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Identity manager backed by a fixed list of users.
#[derive(Debug, Default)]
pub struct SimpleIdentityManager {
    users: HashMap<String, UserEntry>,
}

impl SimpleIdentityManager {
    /// Creates a manager for the given users. Later duplicates win.
    pub fn new(users: impl IntoIterator<Item = UserEntry>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.name.clone(), user))
                .collect(),
        }
    }
}

impl IdentityManager for SimpleIdentityManager {
    fn verify(&self, credentials: &Credentials) -> Option<Identity> {
        let user = self.users.get(&credentials.username)?;
        (user.password == credentials.password).then(|| Identity {
            name: user.name.clone(),
            roles: user.roles.clone(),
        })
    }
}
