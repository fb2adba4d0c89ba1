use super::*;

use serde_json::json;

fn request(document: &str) -> GraphQlRequest {
    GraphQlRequest { query: document.to_owned(), operation_name: None, variables: Map::new() }
}

fn request_with_vars(document: &str, variables: Value) -> GraphQlRequest {
    GraphQlRequest {
        query: document.to_owned(),
        operation_name: None,
        variables: variables.as_object().expect("object literal").clone(),
    }
}

fn hello_schema() -> Schema {
    Schema::new().resolver("Query", "hello", |_args, _ctx| async { Ok(json!("world")) })
}

#[tokio::test]
async fn executes_a_simple_root_field() {
    let response = hello_schema().execute(&request("query { hello }"), Context::new()).await;
    assert!(response.errors.is_empty());
    assert_eq!(response.data, Some(json!({"hello": "world"})));
}

#[tokio::test]
async fn unknown_field_yields_null_data_and_an_error() {
    let response = hello_schema().execute(&request("{ nope }"), Context::new()).await;
    assert_eq!(response.data, Some(json!({"nope": null})));
    assert!(response.errors[0].message.contains("cannot query field 'nope'"));
}

#[tokio::test]
async fn sibling_fields_survive_a_failing_resolver() {
    let schema = hello_schema()
        .resolver("Query", "broken", |_args, _ctx| async { Err(FieldError::new("boom")) });

    let response = schema.execute(&request("{ hello broken }"), Context::new()).await;

    assert_eq!(response.data, Some(json!({"hello": "world", "broken": null})));
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "boom");
}

#[tokio::test]
async fn variables_flow_into_resolver_arguments() {
    let schema = Schema::new().resolver("Query", "echo", |args, _ctx| async move {
        Ok(args.get("value").cloned().unwrap_or(Value::Null))
    });

    let response = schema
        .execute(
            &request_with_vars("query E($value: String!) { echo(value: $value) }", json!({"value": "hi"})),
            Context::new(),
        )
        .await;

    assert_eq!(response.data, Some(json!({"echo": "hi"})));
}

#[tokio::test]
async fn variable_defaults_apply_when_not_provided() {
    let schema = Schema::new().resolver("Query", "echo", |args, _ctx| async move {
        Ok(args.get("value").cloned().unwrap_or(Value::Null))
    });

    let response = schema
        .execute(&request(r#"query E($value: String = "fallback") { echo(value: $value) }"#), Context::new())
        .await;

    assert_eq!(response.data, Some(json!({"echo": "fallback"})));
}

#[tokio::test]
async fn missing_required_variable_fails_the_request() {
    let response = hello_schema()
        .execute(&request("query E($value: String!) { hello }"), Context::new())
        .await;

    assert_eq!(response.data, None);
    assert!(response.errors[0].message.contains("$value"));
}

#[tokio::test]
async fn selection_projects_fields_and_typename() {
    let schema = Schema::new().resolver("Query", "viewer", |_args, _ctx| async {
        Ok(json!({"__typename": "Viewer", "name": "ada", "secret": "hidden"}))
    });

    let response =
        schema.execute(&request("{ viewer { __typename name } }"), Context::new()).await;

    // Unrequested fields are stripped.
    assert_eq!(response.data, Some(json!({"viewer": {"__typename": "Viewer", "name": "ada"}})));
}

#[tokio::test]
async fn per_type_resolvers_cover_computed_fields() {
    let schema = Schema::new()
        .resolver("Query", "viewer", |_args, _ctx| async {
            Ok(json!({"__typename": "Viewer", "name": "ada"}))
        })
        .resolver("Viewer", "shout", |_args, _ctx| async { Ok(json!("ADA!")) });

    let response = schema.execute(&request("{ viewer { name shout } }"), Context::new()).await;

    assert_eq!(response.data, Some(json!({"viewer": {"name": "ada", "shout": "ADA!"}})));
}

#[tokio::test]
async fn null_propagates_through_selections() {
    let schema = Schema::new().resolver("Query", "viewer", |_args, _ctx| async { Ok(Value::Null) });
    let response = schema.execute(&request("{ viewer { name } }"), Context::new()).await;
    assert_eq!(response.data, Some(json!({"viewer": null})));
}

#[tokio::test]
async fn selecting_into_a_scalar_is_an_error() {
    let response = hello_schema().execute(&request("{ hello { sub } }"), Context::new()).await;
    assert_eq!(response.data, Some(json!({"hello": null})));
    assert!(response.errors[0].message.contains("scalar"));
}

#[tokio::test]
async fn parse_errors_fail_the_whole_request() {
    let response = hello_schema().execute(&request("query {"), Context::new()).await;
    assert_eq!(response.data, None);
    assert!(!response.errors.is_empty());
}
