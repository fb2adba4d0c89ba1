//! Per-request render context.

use axum::http::HeaderMap;
use uuid::Uuid;

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

/// Headers never forwarded to the loopback GraphQL request.
const HOP_BY_HOP: &[&str] =
    &["host", "connection", "content-length", "content-type", "transfer-encoding", "upgrade", "keep-alive", "accept-encoding"];

/// State scoped to one SSR request. Never shared or reused across requests.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub request_id: Uuid,
    /// Incoming request headers forwarded to the data layer (cookies, auth).
    pub headers: Vec<(String, String)>,
    pub ssr_mode: bool,
}

impl RenderContext {
    #[must_use]
    pub fn from_request(headers: &HeaderMap) -> Self {
        let forwarded = headers
            .iter()
            .filter_map(|(name, value)| {
                let name = name.as_str().to_ascii_lowercase();
                if HOP_BY_HOP.contains(&name.as_str()) {
                    return None;
                }
                value.to_str().ok().map(|value| (name, value.to_owned()))
            })
            .collect();

        Self { request_id: Uuid::new_v4(), headers: forwarded, ssr_mode: true }
    }
}
