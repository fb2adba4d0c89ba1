use super::*;

use serde_json::json;

#[test]
fn descriptor_has_no_variables() {
    let descriptor = Hello.descriptor();
    assert_eq!(descriptor.cache_key(), "hello");
    assert_eq!(descriptor.document, HELLO_QUERY);
}

#[test]
fn renders_greeting_from_data() {
    let view = Hello.render(&QueryOutcome::Data(json!({"hello": "world"})));
    let View::Element(element) = view else {
        panic!("expected element");
    };
    assert_eq!(element.tag, "div");
    assert!(matches!(&element.children[0], View::Text(text) if text == "world"));
}

#[test]
fn renders_error_fallback_on_failure() {
    let view = Hello.render(&QueryOutcome::Failed("network error".to_owned()));
    let View::Element(element) = view else {
        panic!("expected element");
    };
    assert!(matches!(&element.children[0], View::Text(text) if text == HELLO_ERROR_TEXT));
}

#[test]
fn loading_state_matches_app_shell_copy() {
    let View::Element(element) = Hello.loading() else {
        panic!("expected element");
    };
    assert!(matches!(&element.children[0], View::Text(text) if text == "Loading app"));
}
