use super::*;

use query::QueryOutcome;
use serde_json::json;

fn snapshot_with(key: &str, outcome: QueryOutcome) -> Snapshot {
    let mut snapshot = Snapshot::default();
    snapshot.records.insert(key.to_owned(), outcome);
    snapshot
}

/// The serialized state between the assignment and the closing tag.
fn state_segment(document: &str) -> &str {
    let start = document.find("window.__APP_STATE__ = ").expect("state assignment") + "window.__APP_STATE__ = ".len();
    let end = document[start..].find(";</script>").expect("state terminator") + start;
    &document[start..end]
}

#[test]
fn embeds_markup_inside_the_hydration_root() {
    let html = page("App", "<p>hi</p>", &Snapshot::default()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<div id="root"><p>hi</p></div>"#));
    assert!(html.contains(r#"<script src="/client.bundle.js"></script>"#));
    assert!(html.contains("<title>App</title>"));
}

#[test]
fn escapes_the_document_title() {
    let html = page("A & B <X>", "", &Snapshot::default()).unwrap();
    assert!(html.contains("<title>A &amp; B &lt;X&gt;</title>"));
}

#[test]
fn snapshot_embeds_without_a_second_executable_script_tag() {
    let snapshot = snapshot_with(
        "q",
        QueryOutcome::Data(json!({"x": "</script><script>alert(1)</script>"})),
    );
    let html = page("App", "", &snapshot).unwrap();

    let state = state_segment(&html);
    // No `<` survives serialization, so the payload cannot close the
    // surrounding script element.
    assert!(!state.contains('<'));
    assert!(state.contains("\\u003c"));
}

#[test]
fn embedded_state_parses_back_to_the_same_snapshot() {
    let snapshot = snapshot_with("hello", QueryOutcome::Data(json!({"hello": "<world>"})));
    let html = page("App", "", &snapshot).unwrap();

    let parsed: Snapshot = serde_json::from_str(state_segment(&html)).unwrap();
    assert_eq!(parsed, snapshot);
}
