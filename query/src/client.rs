//! Cache-first query client over a pluggable transport.
//!
//! DESIGN
//! ======
//! A `QueryClient` is constructed fresh per HTTP request on the server and
//! once at bootstrap in the browser; its cache is never shared across
//! requests. `execute` consults the cache before the network, which is what
//! makes hydration refetch-free: a client seeded from the page snapshot
//! answers every already-resolved query without touching the transport.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::cache::{DataCache, QueryOutcome, Snapshot};
use crate::descriptor::QueryDescriptor;
use crate::wire::{GraphQlRequest, GraphQlResponse};

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

/// Error raised by a transport before a GraphQL response was obtained.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    BadResponse(String),
}

/// How a GraphQL request reaches an endpoint.
///
/// The server implements this over loopback HTTP, the browser over fetch,
/// and tests over in-memory stubs. Browser fetch futures are not `Send`, so
/// the wasm build drops that bound.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QueryTransport {
    /// Post one request and return the decoded response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request could not be delivered
    /// or the response body was not a GraphQL response.
    async fn post(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub type SharedTransport = std::sync::Arc<dyn QueryTransport + Send + Sync>;
#[cfg(target_arch = "wasm32")]
pub type SharedTransport = std::sync::Arc<dyn QueryTransport>;

/// Issues queries, caches outcomes, extracts and restores snapshots.
pub struct QueryClient {
    transport: SharedTransport,
    cache: Mutex<DataCache>,
    ssr_mode: bool,
}

impl QueryClient {
    /// Client with an empty cache.
    #[must_use]
    pub fn new(transport: SharedTransport, ssr_mode: bool) -> Self {
        Self { transport, cache: Mutex::new(DataCache::new()), ssr_mode }
    }

    /// Client seeded from a page snapshot (browser bootstrap path).
    #[must_use]
    pub fn from_snapshot(transport: SharedTransport, snapshot: Snapshot) -> Self {
        Self { transport, cache: Mutex::new(DataCache::restore(snapshot)), ssr_mode: false }
    }

    #[must_use]
    pub fn ssr_mode(&self) -> bool {
        self.ssr_mode
    }

    /// Resolve one descriptor: cached outcome if present, otherwise one
    /// network round trip. Every failure is terminal — transport errors and
    /// response `errors` are cached as [`QueryOutcome::Failed`] and never
    /// retried.
    pub async fn execute(&self, descriptor: &QueryDescriptor) -> QueryOutcome {
        let key = descriptor.cache_key();
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let request = GraphQlRequest::from(descriptor);
        let outcome = match self.transport.post(&request).await {
            Ok(response) => outcome_from_response(response),
            Err(err) => QueryOutcome::Failed(err.to_string()),
        };

        self.cache().insert(key, outcome.clone());
        outcome
    }

    /// Cached outcome for a key, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<QueryOutcome> {
        self.cache().get(key).cloned()
    }

    /// Number of cached records.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache().len()
    }

    /// Serializable projection of the current cache contents.
    #[must_use]
    pub fn extract(&self) -> Snapshot {
        self.cache().extract()
    }

    fn cache(&self) -> MutexGuard<'_, DataCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn outcome_from_response(response: GraphQlResponse) -> QueryOutcome {
    if !response.errors.is_empty() {
        let joined = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return QueryOutcome::Failed(joined);
    }
    match response.data {
        Some(data) => QueryOutcome::Data(data),
        None => QueryOutcome::Failed("response carried neither data nor errors".to_owned()),
    }
}
