//! ResTHAL server
//!
//! Serves the databases of a document store as HAL+JSON.

use clap::Parser;
use resthal_rest::security::SecurityConfig;
use resthal_rest::store::InMemoryStore;
use resthal_rest::{ServerConfig, create_app_with_config, create_secured_app, init_logging};
use tracing::{info, warn};

/// Creates the in-memory store, seeded from the configured file if any.
fn create_store(config: &ServerConfig) -> anyhow::Result<InMemoryStore> {
    match &config.seed_file {
        Some(path) => {
            info!(path = %path.display(), "Seeding in-memory store");
            Ok(InMemoryStore::from_file(path)?)
        }
        None => {
            warn!("No seed file configured; starting with an empty store");
            Ok(InMemoryStore::new())
        }
    }
}

/// Builds the router, secured when a security file is configured.
fn create_app(config: &ServerConfig) -> anyhow::Result<axum::Router> {
    let store = create_store(config)?;

    let app = match &config.security_file {
        Some(path) => {
            let security = SecurityConfig::from_file(path)?.into_handler(&config.security_realm);
            create_secured_app(store, config.clone(), security)
        }
        None => {
            warn!("No security file configured; all requests are allowed");
            create_app_with_config(store, config.clone())
        }
    };

    Ok(app)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        base_url = %config.normalized_base_url(),
        "Starting ResTHAL server"
    );

    let app = create_app(&config)?;
    serve(app, &config).await
}
