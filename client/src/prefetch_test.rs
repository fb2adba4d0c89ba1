use super::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use query::{GraphQlRequest, GraphQlResponse, QueryOutcome, QueryTransport, TransportError};
use serde_json::json;

use crate::view::{Element, QueryComponent};

/// Answers every query with an empty object; fails queries whose document
/// contains a scripted marker.
struct ScriptedTransport {
    fail_marker: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self { fail_marker: None, calls: AtomicUsize::new(0) }
    }

    fn failing_on(marker: &str) -> Self {
        Self { fail_marker: Some(marker.to_owned()), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl QueryTransport for ScriptedTransport {
    async fn post(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.fail_marker {
            if request.query.contains(marker.as_str()) {
                return Err(TransportError::Network("scripted failure".to_owned()));
            }
        }
        Ok(GraphQlResponse::data(json!({})))
    }
}

struct Leaf {
    id: u32,
}

impl QueryComponent for Leaf {
    fn descriptor(&self) -> query::QueryDescriptor {
        query::QueryDescriptor::new(&format!("leaf{}", self.id), &format!("query {{ leaf{} }}", self.id))
    }

    fn render(&self, _outcome: &QueryOutcome) -> View {
        View::text("leaf")
    }
}

/// Mounts two leaf queries only after its own query resolves.
struct Parent;

impl QueryComponent for Parent {
    fn descriptor(&self) -> query::QueryDescriptor {
        query::QueryDescriptor::new("parent", "query { parent }")
    }

    fn render(&self, _outcome: &QueryOutcome) -> View {
        View::Fragment(vec![View::query(Leaf { id: 1 }), View::query(Leaf { id: 2 })])
    }
}

/// Pathological tree: every resolution reveals one more query.
struct Diverging {
    depth: usize,
}

impl QueryComponent for Diverging {
    fn descriptor(&self) -> query::QueryDescriptor {
        query::QueryDescriptor::new(
            &format!("diverge{}", self.depth),
            &format!("query {{ diverge{} }}", self.depth),
        )
    }

    fn render(&self, _outcome: &QueryOutcome) -> View {
        View::query(Diverging { depth: self.depth + 1 })
    }
}

fn client(transport: Arc<ScriptedTransport>) -> QueryClient {
    QueryClient::new(transport, true)
}

#[tokio::test]
async fn flat_tree_resolves_in_one_pass() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport.clone());
    let tree = View::Fragment(vec![View::query(Leaf { id: 1 }), View::query(Leaf { id: 2 })]);

    let result = resolve_tree(&tree, &client, PrefetchLimits { max_passes: 1 }).await;

    assert_eq!(result, Ok(()));
    assert_eq!(transport.calls(), 2);
    assert_eq!(client.cached_len(), 2);
}

#[tokio::test]
async fn nested_tree_resolves_in_two_passes() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport.clone());
    let tree = View::query(Parent);

    let result = resolve_tree(&tree, &client, PrefetchLimits { max_passes: 2 }).await;

    assert_eq!(result, Ok(()));
    assert_eq!(transport.calls(), 3);
    assert_eq!(client.cached_len(), 3);
    assert!(client.lookup("leaf1").is_some());
    assert!(client.lookup("leaf2").is_some());
}

#[tokio::test]
async fn nested_tree_exceeds_a_one_pass_cap() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport);
    let tree = View::query(Parent);

    let result = resolve_tree(&tree, &client, PrefetchLimits { max_passes: 1 }).await;

    assert_eq!(result, Err(PrefetchError::PassLimitExceeded { max_passes: 1, still_pending: 2 }));
}

#[tokio::test]
async fn duplicate_descriptors_issue_one_query() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport.clone());
    let tree = View::Fragment(vec![View::query(Leaf { id: 7 }), View::query(Leaf { id: 7 })]);

    resolve_tree(&tree, &client, PrefetchLimits::default()).await.expect("resolve");

    assert_eq!(transport.calls(), 1);
    assert_eq!(client.cached_len(), 1);
}

#[tokio::test]
async fn query_failure_does_not_abort_siblings() {
    let transport = Arc::new(ScriptedTransport::failing_on("leaf1"));
    let client = client(transport.clone());
    let tree = View::Fragment(vec![View::query(Leaf { id: 1 }), View::query(Leaf { id: 2 })]);

    let result = resolve_tree(&tree, &client, PrefetchLimits::default()).await;

    assert_eq!(result, Ok(()));
    assert!(client.lookup("leaf1").expect("leaf1 outcome").is_failed());
    assert_eq!(client.lookup("leaf2"), Some(QueryOutcome::Data(json!({}))));
    // The failure is terminal: no retry pass re-issued it.
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn diverging_tree_hits_the_pass_cap() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport);
    let tree = View::query(Diverging { depth: 0 });

    let result = resolve_tree(&tree, &client, PrefetchLimits::default()).await;

    assert_eq!(
        result,
        Err(PrefetchError::PassLimitExceeded { max_passes: DEFAULT_MAX_PASSES, still_pending: 1 })
    );
}

#[tokio::test]
async fn tree_without_queries_needs_no_passes() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(transport.clone());
    let tree: View = Element::new("div").child(View::text("static")).into();

    let result = resolve_tree(&tree, &client, PrefetchLimits { max_passes: 0 }).await;

    assert_eq!(result, Ok(()));
    assert_eq!(transport.calls(), 0);
}
