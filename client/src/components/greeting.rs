//! Personalized greeting backed by `greeting(name: $name)`.

use query::{QueryDescriptor, QueryOutcome};
use serde_json::{Map, Value};

use crate::view::{Element, QueryComponent, View};

#[cfg(test)]
#[path = "greeting_test.rs"]
mod tests;

pub const GREETING_QUERY: &str =
    "query Greeting($name: String!) { greeting(name: $name) { message } }";

/// Fallback text rendered when the greeting query fails.
pub const GREETING_ERROR_TEXT: &str = "Greeting unavailable";

/// Renders the greeting message for one visitor name.
#[derive(Debug, Clone)]
pub struct Greeting {
    name: String,
}

impl Greeting {
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        Self { name: name.to_owned() }
    }
}

impl QueryComponent for Greeting {
    fn descriptor(&self) -> QueryDescriptor {
        let mut variables = Map::new();
        variables.insert("name".to_owned(), Value::String(self.name.clone()));
        QueryDescriptor::with_variables("greeting", GREETING_QUERY, variables)
    }

    fn loading(&self) -> View {
        Element::new("p").child(View::text("Loading greeting")).into()
    }

    fn render(&self, outcome: &QueryOutcome) -> View {
        match outcome {
            QueryOutcome::Data(data) => {
                let message = data
                    .get("greeting")
                    .and_then(|greeting| greeting.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Element::new("p").attr("class", "greeting").child(View::text(message)).into()
            }
            QueryOutcome::Failed(_) => Element::new("p")
                .attr("class", "error")
                .child(View::text(GREETING_ERROR_TEXT))
                .into(),
        }
    }
}
