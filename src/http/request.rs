//! Request decoding and request IDs.
//!
//! # Responsibilities
//! - Decode the `{"query": ...}` envelope under the configured policy
//! - Generate a request ID for every request (UUID v4)

use std::fmt;

use axum::http::{HeaderName, Request};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::BodyDecoding;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Body of `/expand` and `/parser` requests.
///
/// The `query` key matches case-insensitively, with the last matching key
/// winning. Values that are not strings are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    query: Option<String>,
}

impl<'de> Deserialize<'de> for QueryRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QueryVisitor;

        impl<'de> Visitor<'de> for QueryVisitor {
            type Value = QueryRequest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object with a `query` string")
            }

            fn visit_map<M>(self, mut map: M) -> Result<QueryRequest, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut query = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("query") {
                        if let serde_json::Value::String(value) = map.next_value()? {
                            query = Some(value);
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(QueryRequest { query })
            }
        }

        deserializer.deserialize_map(QueryVisitor)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StrictQueryRequest {
    query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
        }
    }

    /// Decode a raw body.
    ///
    /// Permissive decoding never fails: anything that is not a JSON object
    /// with a string `query` becomes an empty query. Strict decoding requires
    /// exactly that shape, with the key spelled in lowercase.
    pub fn decode(body: &[u8], mode: BodyDecoding) -> Result<Self, serde_json::Error> {
        match mode {
            BodyDecoding::Permissive => Ok(serde_json::from_slice(body).unwrap_or_default()),
            BodyDecoding::Strict => serde_json::from_slice::<StrictQueryRequest>(body)
                .map(|strict| Self::new(strict.query)),
        }
    }

    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}
