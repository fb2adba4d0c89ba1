//! `POST <graphql-path>` — GraphQL request execution.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use query::{GraphQlRequest, GraphQlResponse};

use crate::graphql::Context;
use crate::state::AppState;

#[cfg(test)]
#[path = "graphql_test.rs"]
mod tests;

/// Execute one GraphQL request against the demo schema.
pub async fn execute(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GraphQlRequest>,
) -> Json<GraphQlResponse> {
    let ctx = Context::with_headers(header_pairs(&headers));
    Json(state.schema.execute(&request, ctx).await)
}

/// Lower-cased header name/value pairs for the resolver context.
fn header_pairs(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_ascii_lowercase(), value.to_owned()))
        })
        .collect()
}
