//! HTTP application setup.
//!
//! # Responsibilities
//! - Create the Axum Router from the static route table
//! - Put every matched method and path behind bearer authentication
//! - Wire up middleware (tracing, request ID, sensitive headers)

use std::sync::Arc;

use axum::{
    http::header::AUTHORIZATION,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::TraceLayer,
};

use crate::config::{BodyDecoding, GatewayConfig};
use crate::http::handlers;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::normalize::AddressNormalizer;
use crate::routing::{Endpoint, ROUTES};
use crate::security::{require_bearer, Authenticator};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub normalizer: Arc<dyn AddressNormalizer>,
    pub body_decoding: BodyDecoding,
}

impl AppState {
    pub fn new(normalizer: Arc<dyn AddressNormalizer>, body_decoding: BodyDecoding) -> Self {
        Self {
            normalizer,
            body_decoding,
        }
    }
}

/// Build the full application for `config`.
pub fn build_router(config: &GatewayConfig, normalizer: Arc<dyn AddressNormalizer>) -> Router {
    let state = AppState::new(normalizer, config.requests.body_decoding);
    let auth = Authenticator::new(config.auth.api_key.clone());
    router_with(state, auth)
}

/// Build the router from explicit state and authenticator.
pub fn router_with(state: AppState, auth: Authenticator) -> Router {
    let mut router = Router::new();
    for route in ROUTES {
        // Auth wraps the endpoint only; a wrong method still gets the plain 405.
        let endpoint = method_router(route.endpoint)
            .route_layer(middleware::from_fn_with_state(auth.clone(), require_bearer));
        router = router.route(route.path, endpoint);
    }

    router
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
}

fn method_router(endpoint: Endpoint) -> MethodRouter<AppState> {
    match endpoint {
        Endpoint::Health => get(handlers::health),
        Endpoint::Expand => post(handlers::expand),
        Endpoint::Parse => post(handlers::parse),
    }
}
