//! Address normalization capability.
//!
//! The gateway does not care how addresses are expanded or parsed; it only
//! needs something implementing [`AddressNormalizer`]. [`BasicNormalizer`]
//! is the built-in rule-based implementation.

mod basic;

pub use basic::BasicNormalizer;

use serde::{Deserialize, Serialize};

/// One labeled piece of a parsed address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedComponent {
    pub label: String,
    pub value: String,
}

impl ParsedComponent {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Expansion and parsing of free-text addresses.
///
/// Both operations are synchronous and must not have side effects visible to
/// the gateway. Output order is preserved all the way to the response body.
pub trait AddressNormalizer: Send + Sync + 'static {
    /// Produce normalized variants of `query`.
    fn expand_address(&self, query: &str) -> Vec<String>;

    /// Split `query` into labeled components.
    fn parse_address(&self, query: &str) -> Vec<ParsedComponent>;
}
