//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the whole application: the GraphQL endpoint at
//! the configured path, the static client bundle, and a catch-all GET that
//! server-renders the application shell for every path the static directory
//! does not cover.

pub mod graphql;
pub mod ssr;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let ssr_fallback = get(ssr::catch_all).with_state(state.clone());
    let static_files = ServeDir::new(&state.config.static_dir)
        .append_index_html_on_directories(false)
        .not_found_service(ssr_fallback);

    Router::new()
        .route(&state.config.graphql_path, post(graphql::execute))
        .route("/healthz", get(healthz))
        .with_state(state)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
