//! Response formatting for the binding layer.
//!
//! Errors are serialized as JSON bodies of the form
//! `{"__type": "...", "message": "...", "requestId": "..."}` with the
//! status mapped from the error code. The routing sentinel (no pattern
//! matched) arrives here as [`RpcError::not_found`].

use crate::body::RpcResponseBody;
use crate::error::RpcError;

/// Serialize an error into an HTTP response.
#[must_use]
pub fn error_to_response(err: &RpcError, request_id: &str) -> http::Response<RpcResponseBody> {
    let body = serde_json::json!({
        "__type": err.code.as_str(),
        "message": err.message,
        "requestId": request_id,
    });

    http::Response::builder()
        .status(err.status_code())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(RpcResponseBody::from_string(body.to_string()))
        .expect("static error response should be valid")
}

/// Serialize a JSON value into a success response.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    body: &serde_json::Value,
) -> http::Response<RpcResponseBody> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(RpcResponseBody::from_string(body.to_string()))
        .expect("static json response should be valid")
}
