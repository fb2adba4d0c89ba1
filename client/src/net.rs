//! GraphQL transport for the browser.
//!
//! Client-side (hydrate): real HTTP via `gloo-net` fetch. The endpoint path
//! is substituted at build time from `PUBLIC_GRAPHQL_PATH`, mirroring how
//! public configuration reaches the bundle as literals.

use query::{GraphQlRequest, GraphQlResponse, QueryTransport, TransportError};

#[cfg(test)]
#[path = "net_test.rs"]
mod tests;

/// Path the browser posts queries to. Relative, so requests stay
/// same-origin with the page that served the bundle.
#[must_use]
pub fn graphql_endpoint() -> &'static str {
    option_env!("PUBLIC_GRAPHQL_PATH").unwrap_or("/graphql")
}

/// Browser fetch transport.
#[cfg(feature = "hydrate")]
pub struct FetchTransport {
    endpoint: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    #[must_use]
    pub fn new() -> Self {
        Self { endpoint: graphql_endpoint().to_owned() }
    }
}

#[cfg(feature = "hydrate")]
impl Default for FetchTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "hydrate")]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl QueryTransport for FetchTransport {
    async fn post(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let response = gloo_net::http::Request::post(&self.endpoint)
            .json(request)
            .map_err(|err| TransportError::BadResponse(err.to_string()))?
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        if !response.ok() {
            return Err(TransportError::BadResponse(format!(
                "graphql endpoint returned status {}",
                response.status()
            )));
        }

        response
            .json::<GraphQlResponse>()
            .await
            .map_err(|err| TransportError::BadResponse(err.to_string()))
    }
}
