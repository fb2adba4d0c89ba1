use super::*;

use std::collections::HashMap;

use serde_json::{Map, json};

use query::GraphQlRequest;

use crate::graphql::Context;

fn request(document: &str) -> GraphQlRequest {
    GraphQlRequest { query: document.to_owned(), operation_name: None, variables: Map::new() }
}

fn visitor_context(name: &str) -> Context {
    let mut headers = HashMap::new();
    headers.insert(VISITOR_HEADER.to_owned(), name.to_owned());
    Context::with_headers(headers)
}

#[tokio::test]
async fn hello_resolves_world() {
    let response = schema()
        .execute(&request(client::components::hello::HELLO_QUERY), Context::new())
        .await;

    assert!(response.errors.is_empty());
    assert_eq!(response.data, Some(json!({"hello": "world"})));
}

#[tokio::test]
async fn viewer_personalizes_from_the_visitor_header() {
    let response = schema()
        .execute(&request(client::components::viewer::VIEWER_QUERY), visitor_context("ada"))
        .await;

    assert_eq!(response.data, Some(json!({"viewer": {"name": "ada"}})));
}

#[tokio::test]
async fn viewer_defaults_without_the_header() {
    let response = schema()
        .execute(&request(client::components::viewer::VIEWER_QUERY), Context::new())
        .await;

    assert_eq!(response.data, Some(json!({"viewer": {"name": DEFAULT_VISITOR}})));
}

#[tokio::test]
async fn greeting_formats_the_message() {
    let mut variables = Map::new();
    variables.insert("name".to_owned(), json!("ada"));
    let request = GraphQlRequest {
        query: client::components::greeting::GREETING_QUERY.to_owned(),
        operation_name: None,
        variables,
    };

    let response = schema().execute(&request, Context::new()).await;

    assert!(response.errors.is_empty());
    assert_eq!(response.data, Some(json!({"greeting": {"message": "Hello, ada!"}})));
}

#[tokio::test]
async fn greeting_without_a_name_argument_errors() {
    let response = schema().execute(&request("{ greeting { message } }"), Context::new()).await;
    assert_eq!(response.data, Some(json!({"greeting": null})));
    assert!(response.errors[0].message.contains("name"));
}
