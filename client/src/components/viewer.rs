//! Visitor panel backed by `query { viewer { name } }`.
//!
//! Once the visitor's name is known the panel mounts a nested [`Greeting`]
//! query parameterized by that name — a data dependency that is only
//! reachable after this component's own data has arrived.

use query::{QueryDescriptor, QueryOutcome};
use serde_json::Value;

use crate::components::greeting::Greeting;
use crate::view::{Element, QueryComponent, View};

#[cfg(test)]
#[path = "viewer_test.rs"]
mod tests;

pub const VIEWER_QUERY: &str = "query { viewer { name } }";

/// Fallback text rendered when the viewer query fails.
pub const VIEWER_ERROR_TEXT: &str = "Visitor unavailable";

/// Renders the current visitor and their personalized greeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer;

impl QueryComponent for Viewer {
    fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::new("viewer", VIEWER_QUERY)
    }

    fn loading(&self) -> View {
        Element::new("p").child(View::text("Loading visitor")).into()
    }

    fn render(&self, outcome: &QueryOutcome) -> View {
        match outcome {
            QueryOutcome::Data(data) => {
                let name = data
                    .get("viewer")
                    .and_then(|viewer| viewer.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("visitor");
                Element::new("section")
                    .attr("class", "viewer")
                    .child(Element::new("p").child(View::text(&format!("Signed in as {name}"))))
                    .child(View::query(Greeting::for_name(name)))
                    .into()
            }
            QueryOutcome::Failed(_) => Element::new("p")
                .attr("class", "error")
                .child(View::text(VIEWER_ERROR_TEXT))
                .into(),
        }
    }
}
