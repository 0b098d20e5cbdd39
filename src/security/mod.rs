//! Security subsystem.
//!
//! # Design Decisions
//! - One shared secret, compared in constant time
//! - Failures return a bare 403 with no reason attached
//! - The `Authorization` header is marked sensitive so traces never carry it

pub mod auth;

pub use auth::{require_bearer, Authenticator};
