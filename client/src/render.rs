//! HTML string rendering.
//!
//! DESIGN
//! ======
//! Rendering reads the cache and never mutates it: a `Query` node renders
//! its component with the cached outcome, or the loading fallback when no
//! outcome exists yet. Identical tree + identical cache produce identical
//! markup, which is what makes the hydration comparison in `boot` sound.
//! Escaping mirrors the browser's `innerHTML` serialization (`& < >` in
//! text, `& "` in attribute values) so server and client markup stay
//! byte-comparable.

use query::QueryClient;

use crate::view::{Element, View};

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Render a view tree to an HTML string against the client's cache.
#[must_use]
pub fn render_to_string(view: &View, client: &QueryClient) -> String {
    let mut out = String::new();
    render_into(view, client, &mut out);
    out
}

fn render_into(view: &View, client: &QueryClient, out: &mut String) {
    match view {
        View::Text(text) => out.push_str(&escape_text(text)),
        View::Fragment(children) => {
            for child in children {
                render_into(child, client, out);
            }
        }
        View::Element(element) => render_element(element, client, out),
        View::Query(component) => {
            let key = component.descriptor().cache_key();
            let rendered = match client.lookup(&key) {
                Some(outcome) => component.render(&outcome),
                None => component.loading(),
            };
            render_into(&rendered, client, out);
        }
    }
}

fn render_element(element: &Element, client: &QueryClient, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }

    for child in &element.children {
        render_into(child, client, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Escape text content for element bodies.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
