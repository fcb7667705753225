//! Authentication dispatch.
//!
//! Every request is handled by one of two strategies built once at startup.
//! Both share the same identity and access managers; they differ only in
//! whether a `401` carries a `WWW-Authenticate` challenge. Browsers pop up a
//! login dialog on a challenge, so script clients opt out per request:
//!
//! | Request carries | Strategy |
//! |-----------------|----------|
//! | header `No-Auth-Challenge` | Silent |
//! | query parameter `noauthchallenge` | Silent |
//! | neither | Challenging |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, Method, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::access::AccessManager;
use super::identity::{Identity, IdentityManager, PresentedCredentials};
use crate::error::{RestError, RestResult};

/// Header selecting the silent strategy.
pub const SILENT_HEADER_KEY: &str = "No-Auth-Challenge";

/// Lowercase form of [`SILENT_HEADER_KEY`] for lookups.
const SILENT_HEADER: HeaderName = HeaderName::from_static("no-auth-challenge");

/// Query parameter selecting the silent strategy.
pub const SILENT_QUERY_PARAM_KEY: &str = "noauthchallenge";

/// Whether a `401` challenges the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeMode {
    /// `401` without `WWW-Authenticate`.
    Silent,
    /// `401` with `WWW-Authenticate: Basic realm="..."`.
    Challenging,
}

/// One authentication strategy.
#[derive(Clone)]
pub struct AuthStrategy {
    mode: ChallengeMode,
    identity_manager: Arc<dyn IdentityManager>,
    access_manager: Arc<dyn AccessManager>,
    challenge: Arc<str>,
}

impl AuthStrategy {
    /// Returns this strategy's challenge mode.
    pub fn mode(&self) -> ChallengeMode {
        self.mode
    }

    /// Authenticates and authorizes a request.
    ///
    /// Returns the caller's identity, or `None` for an allowed anonymous
    /// request.
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        method: &Method,
        path: &str,
    ) -> RestResult<Option<Identity>> {
        let identity = match PresentedCredentials::from_headers(headers) {
            PresentedCredentials::Absent => None,
            PresentedCredentials::Basic(credentials) => Some(
                self.identity_manager
                    .verify(&credentials)
                    .ok_or_else(|| self.unauthorized())?,
            ),
            PresentedCredentials::Malformed => return Err(self.unauthorized()),
        };

        if self
            .access_manager
            .is_allowed(identity.as_ref(), method, path)
        {
            return Ok(identity);
        }

        match identity {
            Some(identity) => Err(RestError::Forbidden {
                message: format!("{} may not {} {}", identity.name, method, path),
            }),
            None => Err(self.unauthorized()),
        }
    }

    fn unauthorized(&self) -> RestError {
        let challenge = match self.mode {
            ChallengeMode::Silent => None,
            ChallengeMode::Challenging => Some(self.challenge.to_string()),
        };
        RestError::Unauthorized { challenge }
    }
}

/// Selects and runs the strategy for each request.
#[derive(Clone)]
pub struct SecurityHandler {
    silent: AuthStrategy,
    challenging: AuthStrategy,
}

impl SecurityHandler {
    /// Builds both strategies around shared managers.
    pub fn new(
        identity_manager: Arc<dyn IdentityManager>,
        access_manager: Arc<dyn AccessManager>,
        realm: &str,
    ) -> Self {
        let challenge: Arc<str> = Arc::from(format!("Basic realm=\"{}\"", realm));
        let strategy = |mode: ChallengeMode| AuthStrategy {
            mode,
            identity_manager: Arc::clone(&identity_manager),
            access_manager: Arc::clone(&access_manager),
            challenge: Arc::clone(&challenge),
        };

        Self {
            silent: strategy(ChallengeMode::Silent),
            challenging: strategy(ChallengeMode::Challenging),
        }
    }

    /// Returns the strategy for a request.
    pub fn strategy_for(&self, headers: &HeaderMap, uri: &Uri) -> &AuthStrategy {
        if is_silent(headers, uri) {
            &self.silent
        } else {
            &self.challenging
        }
    }
}

/// Returns true if the request asks not to be challenged.
pub fn is_silent(headers: &HeaderMap, uri: &Uri) -> bool {
    headers.contains_key(SILENT_HEADER)
        || uri.query().is_some_and(|query| {
            query
                .split('&')
                .any(|pair| pair.split('=').next() == Some(SILENT_QUERY_PARAM_KEY))
        })
}

/// Middleware enforcing authentication and access control.
///
/// On success the caller's [`Identity`], if any, is added to the request
/// extensions.
pub async fn security_middleware(
    State(security): State<SecurityHandler>,
    mut request: Request,
    next: Next,
) -> Response {
    let strategy = security.strategy_for(request.headers(), request.uri());

    match strategy.authorize(request.headers(), request.method(), request.uri().path()) {
        Ok(identity) => {
            if let Some(identity) = identity {
                debug!(user = %identity.name, "Authenticated request");
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Err(err) => {
            debug!(
                path = %request.uri().path(),
                mode = ?strategy.mode(),
                error = %err,
                "Request rejected"
            );
            err.into_response()
        }
    }
}
