//! Route configuration.

use axum::{Router, middleware, routing::get};

use crate::handlers;
use crate::security::{SecurityHandler, security_middleware};
use crate::state::AppState;
use crate::store::DocumentStore;

/// Creates all REST API routes.
///
/// # Routes
///
/// - `GET /health` - Health check, never secured
/// - `GET /{db}` - Database
/// - `GET /{db}/{coll}` - Page of a collection
/// - `GET /{db}/{coll}/{id}` - Document
///
/// With a `security` handler, every route except `/health` passes through
/// [`security_middleware`].
pub fn create_routes<S>(state: AppState<S>, security: Option<SecurityHandler>) -> Router
where
    S: DocumentStore + 'static,
{
    let data = Router::new()
        .route("/{db}", get(handlers::database_handler::<S>))
        .route("/{db}/{coll}", get(handlers::collection_handler::<S>))
        .route("/{db}/{coll}/{id}", get(handlers::document_handler::<S>));

    let data = match security {
        Some(security) => data.route_layer(middleware::from_fn_with_state(
            security,
            security_middleware,
        )),
        None => data,
    };

    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .merge(data)
        .with_state(state)
}
