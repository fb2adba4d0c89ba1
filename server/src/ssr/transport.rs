//! Loopback HTTP transport for SSR prefetch.
//!
//! Prefetch queries travel through the server's own public GraphQL endpoint
//! exactly as browser queries do, with the incoming request's headers
//! attached. The reqwest client carries the configured per-query timeout, so
//! a stuck query surfaces as a per-query failure instead of hanging the
//! render.

use async_trait::async_trait;

use query::{GraphQlRequest, GraphQlResponse, QueryTransport, TransportError};

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    headers: Vec<(String, String)>,
}

impl HttpTransport {
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: String, headers: Vec<(String, String)>) -> Self {
        Self { http, endpoint, headers }
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn post(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::BadResponse(format!("graphql endpoint returned {status}")));
        }

        response
            .json::<GraphQlResponse>()
            .await
            .map_err(|err| TransportError::BadResponse(err.to_string()))
    }
}
