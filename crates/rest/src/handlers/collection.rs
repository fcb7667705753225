//! Collection handler.
//!
//! `GET [base]/{db}/{coll}?page=N&pagesize=M` returns one page of documents.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
};
use resthal_hal::{Document, DocumentValue, LinkSet, SELF_RELATION};
use tracing::debug;

use super::{count_value, parent_path, resource_url};
use crate::error::{RestError, RestResult};
use crate::extractors::Pagination;
use crate::responses::hal_response;
use crate::state::AppState;
use crate::store::DocumentStore;

/// Link relation of the enclosing database.
pub const DB_RELATION: &str = "rh:db";

/// Handler for a collection representation.
///
/// # Response
///
/// - `200 OK` - Properties `_id`, `_size` and `_returned`; links `self`,
///   `rh:db`, `first` and, when applicable, `previous` and `next`
/// - `400 Bad Request` - Invalid `page` or `pagesize`
/// - `404 Not Found` - Database or collection does not exist
pub async fn collection_handler<S>(
    State(state): State<AppState<S>>,
    Path((db, coll)): Path<(String, String)>,
    uri: Uri,
    pagination: Pagination,
) -> RestResult<Response>
where
    S: DocumentStore + 'static,
{
    debug!(
        db = %db,
        coll = %coll,
        page = pagination.page(),
        pagesize = pagination.pagesize(),
        "Processing collection request"
    );

    let store = state.store();
    let total = store
        .count_documents(&db, &coll)
        .await?
        .ok_or_else(|| RestError::not_found(uri.path()))?;
    let documents = store
        .find_documents(&db, &coll, pagination.skip(), pagination.pagesize())
        .await?
        .ok_or_else(|| RestError::not_found(uri.path()))?;

    let url = resource_url(&state, uri.path());
    let page_url = |page: Pagination| format!("{}?{}", url, page.to_query());

    let mut links = LinkSet::new()
        .with_uri(SELF_RELATION, url.as_str())?
        .with_uri(DB_RELATION, resource_url(&state, parent_path(uri.path())))?
        .with_uri("first", page_url(pagination.first_page()))?;
    if let Some(previous) = pagination.prev_page() {
        links = links.with_uri("previous", page_url(previous))?;
    }
    if let Some(next) = pagination.next_page(total) {
        links = links.with_uri("next", page_url(next))?;
    }

    let mut properties = Document::new();
    properties.insert("_id".to_string(), DocumentValue::from(coll));
    properties.insert("_size".to_string(), count_value(total));
    properties.insert("_returned".to_string(), count_value(documents.len()));

    let document = state
        .assembler()
        .build_collection(&url, &properties, &links, &documents)?;

    Ok(hal_response(StatusCode::OK, document))
}
