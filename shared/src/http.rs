//! HTTP helpers for the events Lambda.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ApiResponse;

/// Headers attached to every response so the browser front end can call the API.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "GET,POST,DELETE,OPTIONS"),
];

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let mut builder = Response::builder().status(status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    Ok(builder.body(Body::from(serde_json::to_string(data)?))?)
}

/// Create an error response with the given status code, error label and message.
pub fn error_response(
    status: u16,
    error: impl Into<String>,
    message: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ApiResponse::error(error, message))
}

/// Parse request body as JSON, returning a 400 response on failure.
///
/// Returns `Ok(Ok(T))` on successful parse, `Ok(Err(Response))` on parse error (400),
/// or `Err(lambda_http::Error)` on serialization failure. An empty body parses as `{}`.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> Result<Result<T, Response<Body>>, lambda_http::Error> {
    let bytes: &[u8] = body.as_ref();
    let bytes = if bytes.is_empty() { b"{}".as_slice() } else { bytes };

    match serde_json::from_slice(bytes) {
        Ok(parsed) => Ok(Ok(parsed)),
        Err(e) => {
            tracing::error!("JSON decode error: {}", e);
            let response = error_response(400, "Invalid JSON", "Request body must be valid JSON")?;
            Ok(Err(response))
        }
    }
}

/// Macro to parse request body, returning early with 400 on parse error.
///
/// Usage:
/// ```ignore
/// let request: CreateEventRequest = parse_body!(event.body());
/// ```
#[macro_export]
macro_rules! parse_body {
    ($body:expr) => {
        match $crate::http::parse_json_body($body)? {
            Ok(parsed) => parsed,
            Err(response) => return Ok(response),
        }
    };
}
