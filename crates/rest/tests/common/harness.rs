//! REST API test harness.

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use resthal_rest::security::SecurityConfig;
use resthal_rest::store::InMemoryStore;
use resthal_rest::{ServerConfig, create_app_with_config, create_secured_app};

use super::fixtures;

const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");

/// Test harness serving the seeded in-memory store.
///
/// # Example
///
/// ```rust,ignore
/// let harness = RestTestHarness::new();
/// let response = harness.get("/shop/orders").await;
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// Server configuration.
    pub config: ServerConfig,
}

impl RestTestHarness {
    /// Creates an unsecured harness with the testing configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates an unsecured harness with `config`.
    pub fn with_config(config: ServerConfig) -> Self {
        let app = create_app_with_config(seeded_store(), config.clone());
        Self::from_app(app, config)
    }

    /// Creates a harness secured with [`fixtures::security`].
    pub fn secured() -> Self {
        let config = ServerConfig::for_testing();
        let security = SecurityConfig::from_json_str(&fixtures::security().to_string())
            .expect("Failed to parse security fixture")
            .into_handler(&config.security_realm);
        let app = create_secured_app(seeded_store(), config.clone(), security);
        Self::from_app(app, config)
    }

    fn from_app(app: axum::Router, config: ServerConfig) -> Self {
        let server = TestServer::new(app).expect("Failed to create test server");
        Self { server, config }
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Makes a GET request with Basic credentials.
    pub async fn get_as(&self, path: &str, user: &str, password: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(AUTHORIZATION, basic(user, password))
            .await
    }
}

fn seeded_store() -> InMemoryStore {
    InMemoryStore::from_json(fixtures::seed()).expect("Failed to seed store")
}

/// Builds a Basic `Authorization` header value.
pub fn basic(user: &str, password: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{}:{}", user, password));
    HeaderValue::from_str(&format!("Basic {}", encoded)).expect("valid header value")
}
