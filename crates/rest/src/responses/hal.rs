//! HAL+JSON response building.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use resthal_hal::{HAL_JSON_MEDIA_TYPE, HalDocument};
use tracing::debug;

/// Builds a response carrying `document` as `application/hal+json`.
pub fn hal_response(status: StatusCode, document: HalDocument) -> Response {
    if !document.warnings().is_empty() {
        debug!(
            warnings = document.warnings().len(),
            "Representation contains stringified values"
        );
    }

    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(HAL_JSON_MEDIA_TYPE),
        )],
        Json(document),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resthal_hal::{Document, HalAssembler, LinkSet};

    #[test]
    fn test_hal_content_type() {
        let document = HalAssembler::default()
            .build_document("http://h", &Document::new(), &LinkSet::new())
            .unwrap();
        let response = hal_response(StatusCode::OK, document);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/hal+json"
        );
    }
}
