//! Base URL normalization and child reference resolution.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::{HalError, HalResult};

/// Placeholder base used to validate relative references.
const VALIDATION_BASE: &str = "http://reference.invalid/";

/// A syntactically valid URI reference.
///
/// The string is kept exactly as validated; it is not re-serialized through
/// a URL parser, so `http://h/x` stays `http://h/x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Validates `uri` as an absolute or relative URI reference.
    pub fn parse(uri: impl Into<String>) -> HalResult<Self> {
        let uri = uri.into();
        validate(&uri)?;
        Ok(Self(uri))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the reference, returning the string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trims surrounding whitespace and strips every trailing `/`.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(url: &str) -> String {
    url.trim_start()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Builds `normalize(parent_url) + "/" + child_name`.
pub fn resolve(parent_url: &str, child_name: &str) -> HalResult<Reference> {
    Reference::parse(format!("{}/{}", normalize(parent_url), child_name))
}

fn validate(uri: &str) -> HalResult<()> {
    if let Some(c) = uri.chars().find(|c| !is_uri_char(*c)) {
        return Err(HalError::invalid_reference(
            uri,
            format!("illegal character {:?}", c),
        ));
    }
    check_percent_escapes(uri)?;

    match Url::parse(uri) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(VALIDATION_BASE)
                .map_err(|e| HalError::invalid_reference(uri, e.to_string()))?;
            base.join(uri)
                .map(|_| ())
                .map_err(|e| HalError::invalid_reference(uri, e.to_string()))
        }
        Err(e) => Err(HalError::invalid_reference(uri, e.to_string())),
    }
}

/// RFC 3986 unreserved, reserved and `%`.
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~'
                | ':' | '/' | '?' | '#' | '[' | ']' | '@'
                | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
                | '%'
        )
}

fn check_percent_escapes(uri: &str) -> HalResult<()> {
    let bytes = uri.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(HalError::invalid_reference(uri, "malformed percent escape"));
            }
        }
    }
    Ok(())
}
