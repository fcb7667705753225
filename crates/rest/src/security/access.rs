//! Access decisions.

use axum::http::Method;
use serde::Deserialize;

use super::identity::Identity;

/// Role matched by requests without credentials.
pub const UNAUTHENTICATED_ROLE: &str = "$unauthenticated";

/// Decides whether a request may proceed.
pub trait AccessManager: Send + Sync {
    /// `identity` is `None` for anonymous requests.
    fn is_allowed(&self, identity: Option<&Identity>, method: &Method, path: &str) -> bool;
}

/// Grants a role access to a path prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessRule {
    /// Role the rule applies to.
    pub role: String,
    /// Allowed methods; empty means all.
    #[serde(default)]
    pub methods: Vec<String>,
    /// Path prefix, matched on segment boundaries.
    pub path: String,
}

impl AccessRule {
    fn matches(&self, roles: &[&str], method: &Method, path: &str) -> bool {
        roles.contains(&self.role.as_str())
            && (self.methods.is_empty()
                || self
                    .methods
                    .iter()
                    .any(|m| m.eq_ignore_ascii_case(method.as_str())))
            && path_has_prefix(path, &self.path)
    }
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Access manager evaluating a list of [`AccessRule`]s.
///
/// A request is allowed when any rule for one of its roles matches.
#[derive(Debug, Default)]
pub struct SimpleAccessManager {
    rules: Vec<AccessRule>,
}

impl SimpleAccessManager {
    /// Creates a manager for the given rules.
    pub fn new(rules: impl IntoIterator<Item = AccessRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl AccessManager for SimpleAccessManager {
    fn is_allowed(&self, identity: Option<&Identity>, method: &Method, path: &str) -> bool {
        let roles: Vec<&str> = match identity {
            Some(identity) => identity.roles.iter().map(String::as_str).collect(),
            None => vec![UNAUTHENTICATED_ROLE],
        };

        self.rules
            .iter()
            .any(|rule| rule.matches(&roles, method, path))
    }
}
