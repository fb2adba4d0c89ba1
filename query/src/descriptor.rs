//! Query descriptors — the data requirements UI components declare.

use serde_json::{Map, Value};

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod tests;

/// A named data requirement attached to a UI component.
///
/// Declared statically by the component that needs the data and immutable
/// once constructed. The `name` identifies the operation for cache purposes;
/// `document` is the GraphQL source sent to the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub name: String,
    pub document: String,
    pub variables: Map<String, Value>,
}

impl QueryDescriptor {
    /// Descriptor with no input variables.
    #[must_use]
    pub fn new(name: &str, document: &str) -> Self {
        Self { name: name.to_owned(), document: document.to_owned(), variables: Map::new() }
    }

    /// Descriptor with input variables.
    #[must_use]
    pub fn with_variables(name: &str, document: &str, variables: Map<String, Value>) -> Self {
        Self { name: name.to_owned(), document: document.to_owned(), variables }
    }

    /// Deterministic cache key for this descriptor.
    ///
    /// Two descriptors with the same name and semantically equal variables
    /// map to the same key regardless of variable insertion order, so
    /// overlapping requests from different components converge on one cache
    /// entry.
    #[must_use]
    pub fn cache_key(&self) -> String {
        if self.variables.is_empty() {
            return self.name.clone();
        }
        let mut key = String::with_capacity(self.name.len() + 16);
        key.push_str(&self.name);
        key.push('(');
        write_canonical(&Value::Object(self.variables.clone()), &mut key);
        key.push(')');
        key
    }
}

/// Append `value` as JSON with object keys sorted recursively.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
