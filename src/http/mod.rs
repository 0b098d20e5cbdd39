//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection (axum-server)
//!     → server.rs (tracing, request ID, sensitive headers)
//!     → routing table match (404 / 405 otherwise)
//!     → bearer authentication (403 otherwise)
//!     → handlers.rs (decode → normalizer → encode)
//!     → response.rs (JSON body, 500 on encode failure)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{QueryRequest, X_REQUEST_ID};
pub use server::{build_router, router_with, AppState};
