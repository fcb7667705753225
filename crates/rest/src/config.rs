//! Server configuration for the HAL REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 8080 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed origins |
//! | `REST_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `REST_CORS_HEADERS` | Content-Type,Authorization,Accept,No-Auth-Challenge | Allowed headers |
//! | `REST_BASE_URL` | http://localhost:8080 | Base URL used in `_links` |
//! | `REST_DEFAULT_PAGE_SIZE` | 100 | Default collection page size |
//! | `REST_MAX_PAGE_SIZE` | 1000 | Maximum collection page size |
//! | `REST_MAX_NESTING_DEPTH` | 64 | Maximum nesting of stored values |
//! | `REST_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `REST_SECURITY_FILE` | (none) | JSON file with users and permissions |
//! | `REST_SECURITY_REALM` | resthal | Realm sent in Basic challenges |
//! | `REST_SEED_FILE` | (none) | JSON file loaded into the in-memory store |
//!
//! # Example
//!
//! ```rust
//! use resthal_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use clap::Parser;
use resthal_hal::{DEFAULT_MAX_DEPTH, normalize};

/// Server configuration for the HAL REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "resthal")]
#[command(about = "HAL+JSON REST API Server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REST_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REST_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REST_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REST_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "REST_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept,No-Auth-Challenge"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in `_links`).
    #[arg(long, env = "REST_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Default page size for collections.
    #[arg(long, env = "REST_DEFAULT_PAGE_SIZE", default_value = "100")]
    pub default_page_size: usize,

    /// Maximum page size for collections.
    #[arg(long, env = "REST_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: usize,

    /// Maximum nesting depth of stored values before a request fails.
    #[arg(long, env = "REST_MAX_NESTING_DEPTH", default_value = "64")]
    pub max_nesting_depth: usize,

    /// Enable request ID tracking.
    #[arg(long, env = "REST_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// JSON file with users and permissions. Security is off without it.
    #[arg(long, env = "REST_SECURITY_FILE")]
    pub security_file: Option<PathBuf>,

    /// Realm sent in `WWW-Authenticate` challenges.
    #[arg(long, env = "REST_SECURITY_REALM", default_value = "resthal")]
    pub security_realm: String,

    /// JSON file loaded into the in-memory store at startup.
    #[arg(long, env = "REST_SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept,No-Auth-Challenge".to_string(),
            base_url: "http://localhost:8080".to_string(),
            default_page_size: 100,
            max_page_size: 1000,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            enable_request_id: true,
            security_file: None,
            security_realm: "resthal".to_string(),
            seed_file: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse_from(["resthal"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> String {
        normalize(&self.base_url)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.normalized_base_url().is_empty() {
            errors.push("Base URL cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.max_nesting_depth == 0 {
            errors.push("Max nesting depth cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            default_page_size: 10,
            max_page_size: 100,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            enable_request_id: false,
            security_file: None,
            security_realm: "resthal-test".to_string(),
            seed_file: None,
        }
    }
}
