//! Greeting banner backed by `query { hello }`.

use query::{QueryDescriptor, QueryOutcome};
use serde_json::Value;

use crate::view::{Element, QueryComponent, View};

#[cfg(test)]
#[path = "hello_test.rs"]
mod tests;

pub const HELLO_QUERY: &str = "query { hello }";

/// Fallback text rendered when the hello query fails.
pub const HELLO_ERROR_TEXT: &str = "Could not load greeting";

/// Renders the server's hello greeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hello;

impl QueryComponent for Hello {
    fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::new("hello", HELLO_QUERY)
    }

    fn loading(&self) -> View {
        Element::new("p").child(View::text("Loading app")).into()
    }

    fn render(&self, outcome: &QueryOutcome) -> View {
        match outcome {
            QueryOutcome::Data(data) => {
                let text = data.get("hello").and_then(Value::as_str).unwrap_or_default();
                Element::new("div").attr("class", "hello").child(View::text(text)).into()
            }
            QueryOutcome::Failed(_) => Element::new("p")
                .attr("class", "error")
                .child(View::text(HELLO_ERROR_TEXT))
                .into(),
        }
    }
}
