//! GraphQL-over-HTTP wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::descriptor::QueryDescriptor;

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;

/// Request body for `POST <graphql-path>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl From<&QueryDescriptor> for GraphQlRequest {
    fn from(descriptor: &QueryDescriptor) -> Self {
        Self {
            query: descriptor.document.clone(),
            operation_name: None,
            variables: descriptor.variables.clone(),
        }
    }
}

/// Response body: `data` and/or `errors` per the GraphQL spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Successful response carrying only data.
    #[must_use]
    pub fn data(data: Value) -> Self {
        Self { data: Some(data), errors: Vec::new() }
    }

    /// Failed response carrying a single error message.
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self { data: None, errors: vec![GraphQlError { message: message.to_owned() }] }
    }
}

/// A single entry of the response `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}
