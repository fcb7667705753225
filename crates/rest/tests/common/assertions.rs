//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {}, got {}",
        expected, actual
    );
}

/// Asserts that the response is served as HAL+JSON.
pub fn assert_hal_json(response: &TestResponse) {
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(content_type, "application/hal+json");
}

/// Asserts that the body is an error body for `status`.
pub fn assert_error_body(body: &Value, status: u16) {
    assert_eq!(body["http status code"], status);
    assert!(body["http status description"].is_string());
    assert!(body["message"].is_string());
}

/// Returns the `href` of link `relation`.
pub fn href<'a>(body: &'a Value, relation: &str) -> Option<&'a str> {
    body["_links"][relation]["href"].as_str()
}

/// Returns the embedded collection items.
pub fn embedded(body: &Value) -> &Vec<Value> {
    body["_embedded"]["rh:collection"]
        .as_array()
        .expect("Expected _embedded rh:collection array")
}
