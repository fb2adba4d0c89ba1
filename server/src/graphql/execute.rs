//! Resolver-map query executor.
//!
//! ERROR HANDLING
//! ==============
//! Execution produces partial results: a failing root field becomes `null`
//! in `data` plus an entry in `errors`, and its siblings still resolve.
//! Parse and variable-coercion failures fail the whole request with an
//! `errors`-only response.

use std::collections::HashMap;

use futures::future::{BoxFuture, join_all};
use serde_json::{Map, Value};

use query::{GraphQlError, GraphQlRequest, GraphQlResponse};

use super::parse::{self, ArgValue, Field, VariableDef};

#[cfg(test)]
#[path = "execute_test.rs"]
mod tests;

/// Per-request resolver context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Lower-cased request headers.
    pub headers: HashMap<String, String>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_headers(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Error returned by a resolver; surfaces as one `errors` entry.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Coerced arguments for one field invocation.
pub type ResolverArgs = Map<String, Value>;

type ResolverFn =
    Box<dyn Fn(ResolverArgs, Context) -> BoxFuture<'static, Result<Value, FieldError>> + Send + Sync>;

/// Resolver map keyed by (type name, field name).
#[derive(Default)]
pub struct Schema {
    resolvers: HashMap<(String, String), ResolverFn>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for `type_name.field`. Registering the same pair
    /// twice replaces the earlier resolver.
    #[must_use]
    pub fn resolver<F, Fut>(mut self, type_name: &str, field: &str, resolver: F) -> Self
    where
        F: Fn(ResolverArgs, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, FieldError>> + Send + 'static,
    {
        self.resolvers.insert(
            (type_name.to_owned(), field.to_owned()),
            Box::new(move |args, ctx| Box::pin(resolver(args, ctx))),
        );
        self
    }

    /// Execute one request against the resolver map.
    pub async fn execute(&self, request: &GraphQlRequest, ctx: Context) -> GraphQlResponse {
        let operation = match parse::parse_document(&request.query) {
            Ok(operation) => operation,
            Err(message) => return GraphQlResponse::error(&message),
        };
        let variables = match coerce_variables(&operation.variable_defs, &request.variables) {
            Ok(variables) => variables,
            Err(message) => return GraphQlResponse::error(&message),
        };

        // Root fields race independently.
        let resolutions = join_all(operation.selections.iter().map(|field| async {
            (field.name.clone(), self.resolve_root_field(field, &variables, &ctx).await)
        }))
        .await;

        let mut data = Map::new();
        let mut errors = Vec::new();
        for (name, result) in resolutions {
            match result {
                Ok(value) => {
                    data.insert(name, value);
                }
                Err(err) => {
                    data.insert(name, Value::Null);
                    errors.push(GraphQlError { message: err.message });
                }
            }
        }
        GraphQlResponse { data: Some(Value::Object(data)), errors }
    }

    async fn resolve_root_field(
        &self,
        field: &Field,
        variables: &Map<String, Value>,
        ctx: &Context,
    ) -> Result<Value, FieldError> {
        let resolver = self
            .resolvers
            .get(&("Query".to_owned(), field.name.clone()))
            .ok_or_else(|| FieldError::new(format!("cannot query field '{}' on type 'Query'", field.name)))?;
        let args = coerce_arguments(&field.arguments, variables)?;
        let value = resolver(args, ctx.clone()).await?;
        self.complete_value(value, &field.selections, variables, ctx).await
    }

    /// Apply a selection set to a resolved value: project requested fields,
    /// honor per-type resolvers, support `__typename`, propagate nulls.
    fn complete_value<'a>(
        &'a self,
        value: Value,
        selections: &'a [Field],
        variables: &'a Map<String, Value>,
        ctx: &'a Context,
    ) -> BoxFuture<'a, Result<Value, FieldError>> {
        Box::pin(async move {
            if selections.is_empty() {
                return Ok(value);
            }
            match value {
                Value::Null => Ok(Value::Null),
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.complete_value(item, selections, variables, ctx).await?);
                    }
                    Ok(Value::Array(out))
                }
                Value::Object(map) => {
                    let type_name =
                        map.get("__typename").and_then(Value::as_str).unwrap_or_default().to_owned();
                    let mut out = Map::new();
                    for field in selections {
                        if field.name == "__typename" {
                            out.insert("__typename".to_owned(), Value::String(type_name.clone()));
                            continue;
                        }
                        let resolved = if let Some(resolver) =
                            self.resolvers.get(&(type_name.clone(), field.name.clone()))
                        {
                            let args = coerce_arguments(&field.arguments, variables)?;
                            resolver(args, ctx.clone()).await?
                        } else {
                            map.get(&field.name).cloned().unwrap_or(Value::Null)
                        };
                        let completed =
                            self.complete_value(resolved, &field.selections, variables, ctx).await?;
                        out.insert(field.name.clone(), completed);
                    }
                    Ok(Value::Object(out))
                }
                _ => Err(FieldError::new("cannot apply a selection set to a scalar value")),
            }
        })
    }
}

fn coerce_variables(
    defs: &[VariableDef],
    provided: &Map<String, Value>,
) -> Result<Map<String, Value>, String> {
    let mut out = Map::new();
    for def in defs {
        if let Some(value) = provided.get(&def.name) {
            out.insert(def.name.clone(), value.clone());
        } else if let Some(default) = &def.default {
            out.insert(def.name.clone(), default.clone());
        } else if def.type_text.ends_with('!') {
            return Err(format!(
                "variable ${} of required type {} was not provided",
                def.name, def.type_text
            ));
        } else {
            out.insert(def.name.clone(), Value::Null);
        }
    }
    Ok(out)
}

fn coerce_arguments(
    arguments: &[(String, ArgValue)],
    variables: &Map<String, Value>,
) -> Result<ResolverArgs, FieldError> {
    let mut out = Map::new();
    for (name, value) in arguments {
        out.insert(name.clone(), resolve_arg(value, variables)?);
    }
    Ok(out)
}

fn resolve_arg(value: &ArgValue, variables: &Map<String, Value>) -> Result<Value, FieldError> {
    match value {
        ArgValue::Literal(literal) => Ok(literal.clone()),
        ArgValue::Variable(name) => variables
            .get(name)
            .cloned()
            .ok_or_else(|| FieldError::new(format!("variable ${name} is not defined"))),
        ArgValue::List(items) => items
            .iter()
            .map(|item| resolve_arg(item, variables))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        ArgValue::Object(fields) => {
            let mut map = Map::new();
            for (name, field) in fields {
                map.insert(name.clone(), resolve_arg(field, variables)?);
            }
            Ok(Value::Object(map))
        }
    }
}
