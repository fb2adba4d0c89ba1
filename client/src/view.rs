//! Declarative view tree shared by server render and browser hydration.
//!
//! DESIGN
//! ======
//! A `View` describes what to render and which data it needs, never where
//! it runs. Data-dependent subtrees are `Query` nodes: the component behind
//! one declares a descriptor and renders its children only once the outcome
//! for that descriptor is known, so nested query components become reachable
//! pass by pass during prefetch.

use std::sync::Arc;

use query::{QueryDescriptor, QueryOutcome};

/// A component with a declared data dependency.
pub trait QueryComponent: Send + Sync {
    /// The data requirement this component declares. Static per component.
    fn descriptor(&self) -> QueryDescriptor;

    /// Markup while the outcome is not yet cached.
    fn loading(&self) -> View {
        View::text("Loading…")
    }

    /// Markup once the outcome is known — data or terminal failure.
    fn render(&self, outcome: &QueryOutcome) -> View;
}

/// Environment-agnostic view node.
#[derive(Clone)]
pub enum View {
    Element(Element),
    Text(String),
    Fragment(Vec<View>),
    Query(Arc<dyn QueryComponent>),
}

impl View {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }

    #[must_use]
    pub fn query(component: impl QueryComponent + 'static) -> Self {
        Self::Query(Arc::new(component))
    }
}

/// An HTML element with attributes and children, built fluently.
#[derive(Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<View>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_owned(), attrs: Vec::new(), children: Vec::new() }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}
