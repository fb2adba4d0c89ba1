//! Demo schema: the queries the shared UI tree declares.

use serde_json::{Value, json};

use super::execute::{FieldError, Schema};

#[cfg(test)]
#[path = "resolvers_test.rs"]
mod tests;

/// Header that personalizes `Query.viewer` for the incoming request.
pub const VISITOR_HEADER: &str = "x-visitor";

/// Visitor name when no header is present.
pub const DEFAULT_VISITOR: &str = "visitor";

/// Build the demo schema.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .resolver("Query", "hello", |_args, _ctx| async { Ok(json!("world")) })
        .resolver("Query", "viewer", |_args, ctx| async move {
            let name = ctx.header(VISITOR_HEADER).unwrap_or(DEFAULT_VISITOR).to_owned();
            Ok(json!({"__typename": "Viewer", "name": name}))
        })
        .resolver("Query", "greeting", |args, _ctx| async move {
            let name = args
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| FieldError::new("greeting requires a string 'name' argument"))?;
            Ok(json!({"__typename": "Greeting", "message": format!("Hello, {name}!")}))
        })
}
