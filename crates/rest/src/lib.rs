//! # resthal-rest - HAL+JSON REST API over a document store
//!
//! Serves databases, collections and documents of a [`DocumentStore`] as
//! HAL+JSON, built with [`resthal_hal`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resthal_rest::{create_app_with_config, ServerConfig, store::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = InMemoryStore::from_file("seed.json")?;
//!     let config = ServerConfig::default();
//!
//!     let app = create_app_with_config(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Resource | HTTP Method | URL Pattern |
//! |----------|-------------|-------------|
//! | database | GET | `/{db}` |
//! | collection | GET | `/{db}/{coll}?page=N&pagesize=M` |
//! | document | GET | `/{db}/{coll}/{id}` |
//! | health | GET | `/health` |
//!
//! Representations are served as `application/hal+json`. Collections embed
//! their items under `_embedded["rh:collection"]`, each with a `self` link.
//!
//! ## Security
//!
//! With a security file (`REST_SECURITY_FILE`), requests are authenticated
//! with HTTP Basic and checked against role rules. A `401` carries a
//! `WWW-Authenticate` challenge unless the request sends the
//! `No-Auth-Challenge` header or the `noauthchallenge` query parameter.
//! See [`security`].
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 8080 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed CORS origins |
//! | `REST_BASE_URL` | http://localhost:8080 | Prefix of every link |
//! | `REST_DEFAULT_PAGE_SIZE` | 100 | Collection page size |
//! | `REST_MAX_PAGE_SIZE` | 1000 | Largest accepted `pagesize` |
//! | `REST_MAX_NESTING_DEPTH` | 64 | Deepest accepted document nesting |
//! | `REST_SECURITY_FILE` | | Users and access rules (JSON) |
//! | `REST_SEED_FILE` | | Initial in-memory data (JSON) |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (store, configuration, assembler)
//! - [`store`] - Document store abstraction and in-memory store
//! - [`security`] - Authentication and access control
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors
//! - [`responses`] - HAL+JSON responses
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod security;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use security::SecurityHandler;
pub use state::AppState;
pub use store::DocumentStore;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
pub fn create_app<S>(store: S) -> Router
where
    S: DocumentStore + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with custom configuration and no security.
///
/// # Example
///
/// ```rust,ignore
/// use resthal_rest::{create_app_with_config, ServerConfig, store::InMemoryStore};
///
/// let config = ServerConfig {
///     port: 3000,
///     base_url: "https://data.example.com".to_string(),
///     ..Default::default()
/// };
/// let app = create_app_with_config(InMemoryStore::new(), config);
/// ```
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: DocumentStore + 'static,
{
    build_app(store, config, None)
}

/// Creates the Axum application with authentication and access control.
pub fn create_secured_app<S>(store: S, config: ServerConfig, security: SecurityHandler) -> Router
where
    S: DocumentStore + 'static,
{
    build_app(store, config, Some(security))
}

fn build_app<S>(store: S, config: ServerConfig, security: Option<SecurityHandler>) -> Router
where
    S: DocumentStore + 'static,
{
    info!(
        backend = store.backend_name(),
        secured = security.is_some(),
        "Creating REST API server"
    );

    let state = AppState::new(Arc::new(store), config.clone());
    let router = routing::create_routes(state, security);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// Call once at startup. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "resthal={level},resthal_rest={level},resthal_hal={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
