//! Route handlers.
//!
//! `/expand` and `/parser` share one shape: decode the envelope, call the
//! normalizer, encode the result. Nothing here returns a non-200 status for a
//! business-level outcome.
//!
//! The normalizer is synchronous and may be slow, so it runs on tokio's
//! blocking pool instead of a runtime worker.

use axum::{body::Bytes, extract::State, response::Response};

use crate::http::request::QueryRequest;
use crate::http::response::{bad_request, internal_error, json_response};
use crate::http::server::AppState;
use crate::normalize::AddressNormalizer;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn expand(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match decode(&state, &body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let expansions = match run_normalizer(&state, request, |n, q| n.expand_address(q)).await {
        Ok(expansions) => expansions,
        Err(response) => return response,
    };
    tracing::debug!(count = expansions.len(), "Expanded address");
    json_response(&expansions)
}

pub async fn parse(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match decode(&state, &body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let components = match run_normalizer(&state, request, |n, q| n.parse_address(q)).await {
        Ok(components) => components,
        Err(response) => return response,
    };
    tracing::debug!(count = components.len(), "Parsed address");
    json_response(&components)
}

fn decode(state: &AppState, body: &[u8]) -> Result<QueryRequest, Response> {
    QueryRequest::decode(body, state.body_decoding).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed request body");
        bad_request(format!("invalid request body: {}", e))
    })
}

async fn run_normalizer<T, F>(
    state: &AppState,
    request: QueryRequest,
    call: F,
) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&dyn AddressNormalizer, &str) -> T + Send + 'static,
{
    let normalizer = state.normalizer.clone();
    tokio::task::spawn_blocking(move || call(normalizer.as_ref(), request.query()))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Normalizer task failed");
            internal_error()
        })
}
