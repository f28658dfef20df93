//! The content store.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use dx_content::{DocKey, Document, FragKey, Fragment};

use crate::deps::DependencyTracker;
use crate::loader::Loader;
use crate::source::SourceError;

/// Key of a cacheable source: a document or a fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// A document key.
    Doc(DocKey),
    /// A fragment key.
    Fragment(FragKey),
}

impl SourceKey {
    /// The underlying path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Doc(key) => key.as_str(),
            Self::Fragment(key) => key.as_str(),
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DocKey> for SourceKey {
    fn from(key: DocKey) -> Self {
        Self::Doc(key)
    }
}

impl From<FragKey> for SourceKey {
    fn from(key: FragKey) -> Self {
        Self::Fragment(key)
    }
}

/// A cached, immutable parsed value.
#[derive(Clone, Debug)]
pub enum SourceValue {
    /// A parsed document.
    Document(Arc<Document>),
    /// A parsed fragment.
    Fragment(Arc<Fragment>),
}

/// Error computing a store entry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The source layer failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The parser rejected the raw content.
    #[error("parse error in '{key}': {message}")]
    Parse {
        /// Offending source key.
        key: String,
        /// Parser message.
        message: String,
    },
    /// A document key resolved to a fragment or vice versa.
    #[error("'{key}' is not the expected kind of source")]
    KindMismatch {
        /// Offending source key.
        key: String,
    },
}

enum Slot {
    /// Value is computed and shared.
    Ready(SourceValue),
    /// A loader call is running on another thread.
    InFlight,
}

/// In-memory keyed cache of parsed documents and fragments.
///
/// `get` computes and memoizes on miss via the configured [`Loader`].
/// Concurrent misses on the same key are deduplicated: the second request
/// awaits the first instead of recomputing (single-flight). Loader failures
/// propagate to the caller and are never cached - a later call re-attempts
/// the load.
///
/// `invalidate` removes an entry and cascades through the dependency graph
/// to every recorded dependent. The graph is a DAG by construction
/// (fragments cannot embed documents or other fragments), but the cascade
/// still guards against revisits.
///
/// Every invalidation bumps a monotonic revision counter. Watch-mode builds
/// snapshot the revision before reading and discard their results if it
/// moved - a build that raced an invalidation must not publish stale output.
pub struct ContentStore {
    loader: Arc<dyn Loader>,
    entries: Mutex<HashMap<SourceKey, Slot>>,
    flights: Condvar,
    deps: DependencyTracker,
    revision: AtomicU64,
}

impl ContentStore {
    /// Create a store over a loader.
    #[must_use]
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            loader,
            entries: Mutex::new(HashMap::new()),
            flights: Condvar::new(),
            deps: DependencyTracker::new(),
            revision: AtomicU64::new(0),
        }
    }

    /// The dependency tracker for this store.
    #[must_use]
    pub fn dependencies(&self) -> &DependencyTracker {
        &self.deps
    }

    /// Current revision. Bumped once per [`invalidate`](Self::invalidate).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Get a value, computing and memoizing on miss.
    ///
    /// # Errors
    ///
    /// Propagates the loader error; the failure is not cached.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, key: &SourceKey) -> Result<SourceValue, StoreError> {
        {
            let mut entries = self.entries.lock().unwrap();
            loop {
                match entries.get(key) {
                    Some(Slot::Ready(value)) => return Ok(value.clone()),
                    Some(Slot::InFlight) => {
                        // Await the in-flight load; on its failure the slot
                        // is gone and this thread becomes the next leader.
                        entries = self.flights.wait(entries).unwrap();
                    }
                    None => break,
                }
            }
            entries.insert(key.clone(), Slot::InFlight);
        }

        tracing::debug!(key = %key, "store miss, loading");
        let result = self.loader.load(key);

        let mut entries = self.entries.lock().unwrap();
        match result {
            Ok(value) => {
                entries.insert(key.clone(), Slot::Ready(value.clone()));
                self.flights.notify_all();
                Ok(value)
            }
            Err(e) => {
                entries.remove(key);
                self.flights.notify_all();
                Err(e)
            }
        }
    }

    /// Get a document.
    ///
    /// # Errors
    ///
    /// [`StoreError::KindMismatch`] if the key resolves to a fragment, plus
    /// anything [`get`](Self::get) returns.
    pub fn get_document(&self, key: &DocKey) -> Result<Arc<Document>, StoreError> {
        match self.get(&SourceKey::Doc(key.clone()))? {
            SourceValue::Document(doc) => Ok(doc),
            SourceValue::Fragment(_) => Err(StoreError::KindMismatch {
                key: key.as_str().to_owned(),
            }),
        }
    }

    /// Get a fragment.
    ///
    /// # Errors
    ///
    /// [`StoreError::KindMismatch`] if the key resolves to a document, plus
    /// anything [`get`](Self::get) returns.
    pub fn get_fragment(&self, key: &FragKey) -> Result<Arc<Fragment>, StoreError> {
        match self.get(&SourceKey::Fragment(key.clone()))? {
            SourceValue::Fragment(frag) => Ok(frag),
            SourceValue::Document(_) => Err(StoreError::KindMismatch {
                key: key.as_str().to_owned(),
            }),
        }
    }

    /// Remove an entry and every transitive dependent.
    ///
    /// The cascade completes before this method returns; watch mode must
    /// not start the next build pass until then. An entry that is mid-load
    /// on another thread will still land in the map when its loader
    /// finishes - the revision bump lets the build layer reject such a
    /// stale read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn invalidate(&self, key: &SourceKey) {
        let mut entries = self.entries.lock().unwrap();
        let mut visited = HashSet::new();
        self.invalidate_locked(&mut entries, key, &mut visited);
        self.revision.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(key = %key, removed = visited.len(), "invalidated");
    }

    fn invalidate_locked(
        &self,
        entries: &mut HashMap<SourceKey, Slot>,
        key: &SourceKey,
        visited: &mut HashSet<SourceKey>,
    ) {
        if !visited.insert(key.clone()) {
            return;
        }
        entries.remove(key);
        for dependent in self.deps.dependents_of(key) {
            self.invalidate_locked(entries, &dependent, visited);
        }
    }

    /// Number of ready entries (test and logging helper).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    /// Whether the store has no ready entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_content::{ContentNode, Frontmatter};
    use std::sync::atomic::AtomicUsize;

    /// Loader that counts calls and serves canned documents/fragments.
    struct CountingLoader {
        calls: AtomicUsize,
        fail_keys: Vec<SourceKey>,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_keys: Vec::new(),
            }
        }

        fn failing_on(key: SourceKey) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_keys: vec![key],
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Loader for CountingLoader {
        fn load(&self, key: &SourceKey) -> Result<SourceValue, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_keys.contains(key) {
                return Err(StoreError::Parse {
                    key: key.as_str().to_owned(),
                    message: "boom".to_owned(),
                });
            }
            Ok(match key {
                SourceKey::Doc(doc_key) => SourceValue::Document(Arc::new(Document::new(
                    doc_key.clone(),
                    Frontmatter::default(),
                    vec![ContentNode::Text {
                        text: format!("content of {doc_key}"),
                    }],
                ))),
                SourceKey::Fragment(frag_key) => SourceValue::Fragment(Arc::new(Fragment::new(
                    frag_key.clone(),
                    Vec::new(),
                ))),
            })
        }
    }

    fn doc_key(s: &str) -> SourceKey {
        SourceKey::Doc(DocKey::new(s))
    }

    fn frag_key(s: &str) -> SourceKey {
        SourceKey::Fragment(FragKey::new(s))
    }

    #[test]
    fn test_get_memoizes() {
        let loader = Arc::new(CountingLoader::new());
        let store = ContentStore::new(Arc::clone(&loader) as Arc<dyn Loader>);

        store.get(&doc_key("guide")).unwrap();
        store.get(&doc_key("guide")).unwrap();

        assert_eq!(loader.calls(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let loader = Arc::new(CountingLoader::failing_on(doc_key("bad")));
        let store = ContentStore::new(Arc::clone(&loader) as Arc<dyn Loader>);

        assert!(store.get(&doc_key("bad")).is_err());
        assert!(store.get(&doc_key("bad")).is_err());

        // Each attempt re-ran the loader
        assert_eq!(loader.calls(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let loader = Arc::new(CountingLoader::new());
        let store = ContentStore::new(Arc::clone(&loader) as Arc<dyn Loader>);

        store.get(&doc_key("guide")).unwrap();
        store.invalidate(&doc_key("guide"));
        store.get(&doc_key("guide")).unwrap();

        assert_eq!(loader.calls(), 2);
    }

    #[test]
    fn test_invalidate_bumps_revision() {
        let store = ContentStore::new(Arc::new(CountingLoader::new()) as Arc<dyn Loader>);

        let before = store.revision();
        store.invalidate(&doc_key("guide"));

        assert_eq!(store.revision(), before + 1);
    }

    #[test]
    fn test_invalidate_cascades_to_exactly_the_dependents() {
        let loader = Arc::new(CountingLoader::new());
        let store = ContentStore::new(Arc::clone(&loader) as Arc<dyn Loader>);

        // A and B embed the fragment; C does not.
        for key in ["a", "b", "c"] {
            store.get(&doc_key(key)).unwrap();
        }
        store.get(&frag_key("snippet")).unwrap();
        store.dependencies().record(doc_key("a"), frag_key("snippet"));
        store.dependencies().record(doc_key("b"), frag_key("snippet"));

        store.invalidate(&frag_key("snippet"));

        assert_eq!(store.len(), 1); // only C survives
        let calls_before = loader.calls();
        store.get(&doc_key("c")).unwrap(); // still cached
        assert_eq!(loader.calls(), calls_before);
        store.get(&doc_key("a")).unwrap(); // recomputed
        store.get(&doc_key("b")).unwrap();
        assert_eq!(loader.calls(), calls_before + 2);
    }

    #[test]
    fn test_invalidate_transitive_chain() {
        let loader = Arc::new(CountingLoader::new());
        let store = ContentStore::new(Arc::clone(&loader) as Arc<dyn Loader>);

        // reference-table doc -> consumed by doc "api"; "api" embeds nothing
        store.get(&doc_key("tables/errors")).unwrap();
        store.get(&doc_key("api")).unwrap();
        store
            .dependencies()
            .record(doc_key("api"), doc_key("tables/errors"));

        store.invalidate(&doc_key("tables/errors"));

        assert!(store.is_empty());
    }

    #[test]
    fn test_kind_mismatch() {
        struct WrongKindLoader;
        impl Loader for WrongKindLoader {
            fn load(&self, key: &SourceKey) -> Result<SourceValue, StoreError> {
                // Always serves a fragment, even for document keys
                Ok(SourceValue::Fragment(Arc::new(Fragment::new(
                    FragKey::new(key.as_str()),
                    Vec::new(),
                ))))
            }
        }

        let store = ContentStore::new(Arc::new(WrongKindLoader));

        assert!(matches!(
            store.get_document(&DocKey::new("guide")),
            Err(StoreError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_concurrent_gets_single_flight() {
        use std::sync::Barrier;

        /// Loader that blocks until all threads have arrived, so every
        /// thread is in `get` for the same key simultaneously.
        struct SlowLoader {
            calls: AtomicUsize,
        }
        impl Loader for SlowLoader {
            fn load(&self, key: &SourceKey) -> Result<SourceValue, StoreError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(50));
                Ok(SourceValue::Document(Arc::new(Document::new(
                    DocKey::new(key.as_str()),
                    Frontmatter::default(),
                    Vec::new(),
                ))))
            }
        }

        let loader = Arc::new(SlowLoader {
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(ContentStore::new(
            Arc::clone(&loader) as Arc<dyn Loader>
        ));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    store.get(&SourceKey::Doc(DocKey::new("guide"))).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }
}
