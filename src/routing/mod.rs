//! Static route table.
//!
//! # Data Flow
//! ```text
//! ROUTES (built once at startup)
//!     → http::server turns each entry into an axum route
//!     → unmatched paths fall through to axum's 404
//!     → matched path with another method gets axum's 405
//! ```
//!
//! # Design Decisions
//! - Exact match on method and path, no wildcards or parameters
//! - No runtime registration
//! - Method and path matching is left to axum; this table only says what gets mounted

use axum::http::Method;

/// What a route does once matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Liveness check.
    Health,
    /// Address expansion.
    Expand,
    /// Address parsing.
    Parse,
}

impl Endpoint {
    /// The only method this endpoint answers.
    pub fn method(self) -> Method {
        match self {
            Endpoint::Health => Method::GET,
            Endpoint::Expand | Endpoint::Parse => Method::POST,
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub endpoint: Endpoint,
}

/// Every route the gateway serves.
pub static ROUTES: &[RouteSpec] = &[
    RouteSpec {
        path: "/health",
        endpoint: Endpoint::Health,
    },
    RouteSpec {
        path: "/expand",
        endpoint: Endpoint::Expand,
    },
    RouteSpec {
        path: "/parser",
        endpoint: Endpoint::Parse,
    },
];
