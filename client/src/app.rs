//! The shared application tree.
//!
//! Built fresh per server request and once at browser bootstrap; the tree
//! itself is immutable, all request state lives in the query client's cache.

use crate::components::hello::Hello;
use crate::components::viewer::Viewer;
use crate::view::{Element, View};

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

/// Document title, shared with the server's document assembly.
pub const PAGE_TITLE: &str = "SSR GraphQL App";

/// Page shell: header, data-dependent content, footer.
#[must_use]
pub fn app() -> View {
    Element::new("div")
        .attr("class", "app")
        .child(Element::new("header").child(Element::new("h1").child(View::text(PAGE_TITLE))))
        .child(
            Element::new("main")
                .child(View::query(Hello))
                .child(View::query(Viewer)),
        )
        .child(Element::new("footer").child(Element::new("p").child(View::text("Footer"))))
        .into()
}
