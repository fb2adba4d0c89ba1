//! Per-request render pipeline.

use std::sync::Arc;

use axum::http::HeaderMap;

use client::prefetch::{self, PrefetchError, PrefetchLimits};
use client::{app, render};
use query::{QueryClient, SharedTransport};

use crate::state::AppState;

use super::context::RenderContext;
use super::document;
use super::transport::HttpTransport;

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("prefetch failed: {0}")]
    Prefetch(#[from] PrefetchError),
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Render the application document for one incoming request.
///
/// Constructs a fresh render context and query client — request state never
/// crosses requests — and runs the prefetch/render/snapshot pipeline over
/// the loopback transport.
///
/// # Errors
///
/// Returns a [`PipelineError`] when prefetch fails to converge or the
/// snapshot cannot be serialized. Individual query failures are not
/// pipeline errors; they render as component fallbacks.
pub async fn render_page(state: &AppState, headers: &HeaderMap) -> Result<String, PipelineError> {
    let context = RenderContext::from_request(headers);
    let transport: SharedTransport = Arc::new(HttpTransport::new(
        state.http.clone(),
        state.config.graphql_endpoint(),
        context.headers.clone(),
    ));
    render_with_transport(context, transport, state.config.prefetch_limits()).await
}

/// Pipeline body with the transport injected; tests substitute in-memory
/// transports through the same seam.
pub async fn render_with_transport(
    context: RenderContext,
    transport: SharedTransport,
    limits: PrefetchLimits,
) -> Result<String, PipelineError> {
    let client = QueryClient::new(transport, context.ssr_mode);
    let tree = app::app();

    prefetch::resolve_tree(&tree, &client, limits).await?;

    let markup = render::render_to_string(&tree, &client);
    let snapshot = client.extract();
    tracing::debug!(
        request_id = %context.request_id,
        records = snapshot.records.len(),
        "render pipeline complete"
    );

    document::page(app::PAGE_TITLE, &markup, &snapshot).map_err(PipelineError::from)
}
