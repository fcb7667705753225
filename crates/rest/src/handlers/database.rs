//! Database handler.
//!
//! `GET [base]/{db}` lists the collections of a database.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
};
use resthal_hal::{Document, DocumentValue, LinkSet, SELF_RELATION};
use tracing::debug;

use super::{count_value, resource_url};
use crate::error::{RestError, RestResult};
use crate::responses::hal_response;
use crate::state::AppState;
use crate::store::DocumentStore;

/// Handler for a database representation.
///
/// # Response
///
/// - `200 OK` - Properties `_id` and `_size`, one embedded item per
///   collection
/// - `404 Not Found` - Database does not exist
pub async fn database_handler<S>(
    State(state): State<AppState<S>>,
    Path(db): Path<String>,
    uri: Uri,
) -> RestResult<Response>
where
    S: DocumentStore + 'static,
{
    debug!(db = %db, "Processing database request");

    let collections = state
        .store()
        .list_collections(&db)
        .await?
        .ok_or_else(|| RestError::not_found(uri.path()))?;

    let url = resource_url(&state, uri.path());
    let links = LinkSet::new().with_uri(SELF_RELATION, url.as_str())?;

    let mut properties = Document::new();
    properties.insert("_id".to_string(), DocumentValue::from(db));
    properties.insert("_size".to_string(), count_value(collections.len()));

    let items: Vec<Document> = collections
        .into_iter()
        .map(|name| Document::from([("_id".to_string(), DocumentValue::from(name))]))
        .collect();

    let document = state
        .assembler()
        .build_collection(&url, &properties, &links, &items)?;

    Ok(hal_response(StatusCode::OK, document))
}
