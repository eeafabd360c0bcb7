// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode
//!
//! Login codes and session tokens are masked before they are logged.

use axum::body::{to_bytes, Bytes};
use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_sensitive;

/// Renders a body for the log line, masking credentials. Non-JSON bodies
/// are logged only as their length.
fn printable_body(bytes: &Bytes) -> String {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(mut json) => {
            redact_sensitive(&mut json);
            serde_json::to_string(&json).unwrap_or_default()
        }
        Err(_) => format!("<{} bytes>", bytes.len()),
    }
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %printable_body(&bytes),
            "📥 Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            status = %parts.status,
            response_body = %printable_body(&bytes),
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
