//! Dependency tracking between documents and the sources they embed.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::store::SourceKey;

/// Bipartite graph of dependency edges, keyed both ways.
///
/// Owns only key pairs - never content - so the store remains the single
/// source of truth for cached values. Edges for a dependent are dropped and
/// fully re-recorded each time the document is reprocessed, so removed
/// embeds stop triggering invalidation.
#[derive(Debug, Default)]
pub struct DependencyTracker {
    inner: Mutex<Edges>,
}

#[derive(Debug, Default)]
struct Edges {
    /// dependent -> its dependencies.
    forward: HashMap<SourceKey, HashSet<SourceKey>>,
    /// dependency -> its dependents.
    reverse: HashMap<SourceKey, HashSet<SourceKey>>,
}

impl DependencyTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent` uses `dependency`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn record(&self, dependent: SourceKey, dependency: SourceKey) {
        let mut edges = self.inner.lock().unwrap();
        edges
            .forward
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());
        edges.reverse.entry(dependency).or_default().insert(dependent);
    }

    /// Drop every edge recorded for `dependent`.
    ///
    /// Called at the start of each reprocessing pass (stale-edge garbage
    /// collection).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear_dependent(&self, dependent: &SourceKey) {
        let mut edges = self.inner.lock().unwrap();
        if let Some(dependencies) = edges.forward.remove(dependent) {
            for dependency in dependencies {
                if let Some(dependents) = edges.reverse.get_mut(&dependency) {
                    dependents.remove(dependent);
                    if dependents.is_empty() {
                        edges.reverse.remove(&dependency);
                    }
                }
            }
        }
    }

    /// Every recorded dependent of `dependency`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn dependents_of(&self, dependency: &SourceKey) -> Vec<SourceKey> {
        self.inner
            .lock()
            .unwrap()
            .reverse
            .get(dependency)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of edges.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .forward
            .values()
            .map(HashSet::len)
            .sum()
    }
}
