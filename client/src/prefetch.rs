//! Fixed-point data-prefetch walker.
//!
//! ARCHITECTURE
//! ============
//! The tree's shape depends on the data being fetched: a query component's
//! children exist only once its own outcome is cached, and those children
//! may declare further queries. Each pass therefore walks the
//! currently-reachable tree, collects every descriptor with no cached
//! outcome, issues the collected queries concurrently, and re-walks. The
//! walk is done when a pass collects nothing.
//!
//! Pass boundaries are sequential: a later pass never starts until every
//! query of the current pass has settled. A query failure is terminal and
//! local — it is cached and rendered as the component's fallback, and does
//! not abort siblings or the walk.

use std::collections::HashSet;

use futures::future::join_all;
use query::{QueryClient, QueryDescriptor};

use crate::view::View;

#[cfg(test)]
#[path = "prefetch_test.rs"]
mod tests;

/// Default cap on fixed-point passes.
pub const DEFAULT_MAX_PASSES: usize = 8;

/// Bounds for the fixed-point iteration.
///
/// A tree that keeps revealing new queries would otherwise loop forever;
/// the cap turns that caller error into a bounded, descriptive failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchLimits {
    pub max_passes: usize,
}

impl Default for PrefetchLimits {
    fn default() -> Self {
        Self { max_passes: DEFAULT_MAX_PASSES }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefetchError {
    #[error("prefetch did not converge within {max_passes} passes ({still_pending} queries still pending)")]
    PassLimitExceeded { max_passes: usize, still_pending: usize },
}

/// Resolve every query descriptor reachable from `root` into the client's
/// cache, including descriptors only reachable after an ancestor's data
/// arrives.
///
/// # Errors
///
/// Returns [`PrefetchError::PassLimitExceeded`] when the tree still has
/// pending queries after `limits.max_passes` passes.
pub async fn resolve_tree(
    root: &View,
    client: &QueryClient,
    limits: PrefetchLimits,
) -> Result<(), PrefetchError> {
    for pass in 0..limits.max_passes {
        let pending = collect_pending(root, client);
        if pending.is_empty() {
            log::debug!("prefetch converged after {pass} passes");
            return Ok(());
        }
        log::debug!("prefetch pass {pass}: {} pending queries", pending.len());
        join_all(pending.iter().map(|descriptor| client.execute(descriptor))).await;
    }

    let still_pending = collect_pending(root, client).len();
    if still_pending == 0 {
        log::debug!("prefetch converged after {} passes", limits.max_passes);
        return Ok(());
    }
    Err(PrefetchError::PassLimitExceeded { max_passes: limits.max_passes, still_pending })
}

/// Descriptors mounted in the currently-reachable tree with no cached
/// outcome, deduplicated by cache key.
fn collect_pending(root: &View, client: &QueryClient) -> Vec<QueryDescriptor> {
    let mut pending = Vec::new();
    let mut seen = HashSet::new();
    walk(root, client, &mut pending, &mut seen);
    pending
}

fn walk(
    view: &View,
    client: &QueryClient,
    pending: &mut Vec<QueryDescriptor>,
    seen: &mut HashSet<String>,
) {
    match view {
        View::Text(_) => {}
        View::Element(element) => {
            for child in &element.children {
                walk(child, client, pending, seen);
            }
        }
        View::Fragment(children) => {
            for child in children {
                walk(child, client, pending, seen);
            }
        }
        View::Query(component) => {
            let descriptor = component.descriptor();
            let key = descriptor.cache_key();
            match client.lookup(&key) {
                // Resolved: the component's subtree is mounted, walk into it
                // for queries revealed by this outcome.
                Some(outcome) => walk(&component.render(&outcome), client, pending, seen),
                None => {
                    if seen.insert(key) {
                        pending.push(descriptor);
                    }
                }
            }
        }
    }
}
