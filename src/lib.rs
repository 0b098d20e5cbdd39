//! Address normalization gateway.
//!
//! Exposes address expansion and parsing over HTTP behind a shared bearer
//! token, with plain or TLS listeners and bounded graceful shutdown.
//!
//! ```text
//!   client ──▶ net (listener, TLS) ──▶ http (trace, request id)
//!                                         │
//!                                         ▼
//!                               routing table ──▶ security (bearer auth)
//!                                                        │
//!                                                        ▼
//!                                           handlers ──▶ normalize
//!
//!   lifecycle: Configuring → Listening → Serving → ShuttingDown → Stopped
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod normalize;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::build_router;
pub use lifecycle::{Gateway, LifecycleState, ShutdownOutcome};
pub use normalize::{AddressNormalizer, BasicNormalizer, ParsedComponent};
