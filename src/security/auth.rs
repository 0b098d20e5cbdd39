//! Bearer token authentication.
//!
//! Every matched route sits behind [`require_bearer`]. The header is expected
//! to look like `Bearer <token>`; only the length of the prefix is checked and
//! the token bytes are compared against the configured key in constant time.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::{Choice, ConstantTimeEq};

use crate::config::ApiKey;

/// Length of the `Bearer ` prefix.
pub const BEARER_PREFIX_LEN: usize = 7;

/// `Bearer a` is the shortest header that can carry a token.
pub const MIN_HEADER_LEN: usize = BEARER_PREFIX_LEN + 1;

/// Checks `Authorization` headers against the shared secret.
#[derive(Clone)]
pub struct Authenticator {
    secret: Arc<ApiKey>,
}

impl Authenticator {
    pub fn new(secret: ApiKey) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    /// Decide whether a raw `Authorization` header value grants access.
    ///
    /// An empty configured secret never matches.
    pub fn verify(&self, header: Option<&[u8]>) -> bool {
        let Some(header) = header else {
            return false;
        };
        if header.len() < MIN_HEADER_LEN {
            return false;
        }

        let supplied = &header[BEARER_PREFIX_LEN..];
        let secret = self.secret.as_bytes();
        let configured = Choice::from(u8::from(!secret.is_empty()));

        bool::from(supplied.ct_eq(secret) & configured)
    }
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_bearer(
    State(auth): State<Authenticator>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = auth.verify(
        request
            .headers()
            .get(AUTHORIZATION)
            .map(HeaderValue::as_bytes),
    );

    if authorized {
        return next.run(request).await;
    }

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejected request with missing or invalid bearer token"
    );
    forbidden()
}

/// The one response given to unauthenticated callers.
pub fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Forbidden").into_response()
}
