//! Catch-all SSR route.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::ssr::pipeline;
use crate::state::AppState;

#[cfg(test)]
#[path = "ssr_test.rs"]
mod tests;

/// Fixed body returned when the render pipeline fails. The real error is
/// logged server-side and never leaks into the response.
pub const GENERIC_ERROR_BODY: &str = "Internal Server Error";

/// `GET /*` — server-render the application shell.
///
/// Success is the complete document with status 200. Any pipeline failure
/// is status 500 with the generic body; no partial HTML is ever sent.
pub async fn catch_all(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    match pipeline::render_page(&state, &headers).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, path = %uri.path(), "server-side rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
        }
    }
}
