//! Request-scoped data cache and its serializable snapshot.
//!
//! DESIGN
//! ======
//! A `DataCache` lives exactly as long as one HTTP request (server) or one
//! browser session (client). It is insert-only: query resolutions add
//! entries, nothing evicts them. Failures are cached too, so a failed query
//! is rendered as its component's fallback and never retried — on either
//! side of the handshake.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;

/// Terminal result of one query resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum QueryOutcome {
    /// The `data` object of a successful response.
    Data(Value),
    /// Terminal failure message (transport or resolver error).
    Failed(String),
}

impl QueryOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Mapping from normalized cache key to the current outcome for that query.
#[derive(Debug, Default)]
pub struct DataCache {
    records: HashMap<String, QueryOutcome>,
}

impl DataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a cache from a snapshot embedded in a server-rendered page.
    #[must_use]
    pub fn restore(snapshot: Snapshot) -> Self {
        Self { records: snapshot.records.into_iter().collect() }
    }

    pub fn insert(&mut self, key: String, outcome: QueryOutcome) {
        self.records.insert(key, outcome);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryOutcome> {
        self.records.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializable projection of the current contents.
    ///
    /// Keys are emitted in sorted order so the embedded snapshot is stable
    /// for a given set of resolved queries.
    #[must_use]
    pub fn extract(&self) -> Snapshot {
        Snapshot {
            records: self
                .records
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// One-shot projection of a `DataCache`, handed from the server-rendered
/// document to the browser bootstrap and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: BTreeMap<String, QueryOutcome>,
}

impl Snapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
