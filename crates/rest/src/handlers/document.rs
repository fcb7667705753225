//! Document handler.
//!
//! `GET [base]/{db}/{coll}/{id}` returns one stored document.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
};
use resthal_hal::{LinkSet, SELF_RELATION};
use tracing::debug;

use super::{parent_path, resource_url};
use crate::error::{RestError, RestResult};
use crate::responses::hal_response;
use crate::state::AppState;
use crate::store::DocumentStore;

/// Link relation of the enclosing collection.
pub const COLL_RELATION: &str = "rh:coll";

/// Handler for a document representation.
///
/// The document is looked up by the string form of its `_id`.
///
/// # Response
///
/// - `200 OK` - The stored fields; links `self` and `rh:coll`
/// - `404 Not Found` - Database, collection or document does not exist
pub async fn document_handler<S>(
    State(state): State<AppState<S>>,
    Path((db, coll, id)): Path<(String, String, String)>,
    uri: Uri,
) -> RestResult<Response>
where
    S: DocumentStore + 'static,
{
    debug!(db = %db, coll = %coll, id = %id, "Processing document request");

    let stored = state
        .store()
        .find_document(&db, &coll, &id)
        .await?
        .ok_or_else(|| RestError::not_found(uri.path()))?;

    let url = resource_url(&state, uri.path());
    let links = LinkSet::new()
        .with_uri(SELF_RELATION, url.as_str())?
        .with_uri(COLL_RELATION, resource_url(&state, parent_path(uri.path())))?;

    let document = state.assembler().build_document(&url, &stored, &links)?;

    Ok(hal_response(StatusCode::OK, document))
}
