//! Resolution of inbound requests to stored mocks.
//!
//! The store narrows the candidates down to active mocks with the exact
//! method and path; the resolver then checks body and query-parameter
//! equality and picks the lowest-id mock among the survivors.

use std::sync::Arc;

use tracing::debug;

use crate::multimap::{canonicalize, from_pairs, MultiMapEntry};
use crate::storage::{Mock, MockStore, StoreError};

/// The parts of an inbound request that take part in matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestShape {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
    /// Canonical query parameters
    pub query_params: Vec<MultiMapEntry>,
}

impl RequestShape {
    /// Build a request shape from raw request parts.
    ///
    /// # Parameters
    ///
    /// - `method` - HTTP verb, compared case-sensitively
    /// - `path` - Request path without query string
    /// - `body` - Raw body; ignored for GET
    /// - `query` - Decoded query-string pairs in wire order
    ///
    /// # Returns
    ///
    /// Returns a `RequestShape` with canonicalized query parameters.
    pub fn new<I>(
        method: impl Into<String>,
        path: impl Into<String>,
        body: impl Into<Vec<u8>>,
        query: I,
    ) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let method = method.into();
        let body = if method == "GET" { Vec::new() } else { body.into() };
        Self { method, path: path.into(), body, query_params: canonicalize(&from_pairs(query)) }
    }
}

/// Check whether a stored mock matches a request.
///
/// All of the following must hold: the mock is active, method and path are
/// equal, the bodies are byte-for-byte equal (for GET the stored body must be
/// empty and the request body is ignored) and the canonical query-parameter
/// sequences are identical.
pub fn matches(mock: &Mock, rq: &RequestShape) -> bool {
    if !mock.active || mock.rq_method != rq.method || mock.rq_path != rq.path {
        return false;
    }

    let body_matches = if rq.method == "GET" {
        mock.rq_body.is_empty()
    } else {
        mock.rq_body.as_bytes() == rq.body.as_slice()
    };

    body_matches && mock.rq_query_params == rq.query_params
}

/// Finds the mock to replay for an inbound request.
#[derive(Clone)]
pub struct MockResolver {
    store: Arc<dyn MockStore>,
}

impl MockResolver {
    /// Create a new resolver reading from the given store.
    pub fn new(store: Arc<dyn MockStore>) -> Self {
        Self { store }
    }

    /// Resolve a request to at most one mock.
    ///
    /// When several mocks match, the one with the lowest id wins.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(mock))` on a match and `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns the store's error if candidates could not be loaded.
    pub fn resolve(&self, rq: &RequestShape) -> Result<Option<Mock>, StoreError> {
        let candidates = self.store.active_mocks_for(&rq.method, &rq.path)?;
        debug!(candidates = candidates.len(), "loaded mock candidates");

        let found = candidates.into_iter().filter(|m| matches(m, rq)).min_by_key(|m| m.id);
        if let Some(mock) = &found {
            debug!(mock_id = mock.id, mock_name = %mock.name, "mock matched");
        }
        Ok(found)
    }
}
