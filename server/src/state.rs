//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! holds only cross-request immutables: config, the GraphQL schema, and the
//! shared HTTP connection pool. Per-request state — the render context and
//! the data cache — is constructed inside handlers and never stored here,
//! which is what keeps one request's data out of another's response.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::graphql::Schema;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schema: Arc<Schema>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Panics
    ///
    /// Panics when the TLS backend cannot be initialized — startup-fatal,
    /// like a failed bind.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.query_timeout_secs))
            .build()
            .expect("failed to build http client");

        Self { config: Arc::new(config), schema: Arc::new(crate::graphql::schema()), http }
    }
}
