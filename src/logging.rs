//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{StatusCode, request, response},
    middleware::Next,
    response::Response,
};

use crate::{Error, validation::ValidationError};

/// The number of bytes of a request or response body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Bodies are passed on byte for byte. Request bodies are subject to axum's
/// default body limit.
///
/// # Errors
/// Responds with 413 Payload Too Large if the request body is over the limit,
/// or 400 Bad Request if it could not be read.
pub async fn logging_middleware(request: Request, next: Next) -> Result<Response, Error> {
    let (parts, body) = request.into_parts();
    let bytes = read_request_body(body).await?;
    log_request(&parts, &String::from_utf8_lossy(&bytes));

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::ResponseBodyError(error.to_string()))?;
    log_response(&parts, &String::from_utf8_lossy(&bytes));

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

async fn read_request_body(body: Body) -> Result<Bytes, Error> {
    Bytes::from_request(Request::new(body), &())
        .await
        .map_err(|rejection| {
            tracing::warn!("Could not read request body: {}", rejection.body_text());

            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                Error::PayloadTooLarge
            } else {
                ValidationError::InvalidBody(rejection.body_text()).into()
            }
        })
}

/// The first [LOG_BODY_LENGTH_LIMIT] bytes of `body`, shortened to the nearest
/// character boundary, or `None` if `body` fits within the limit.
fn truncate_body(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
