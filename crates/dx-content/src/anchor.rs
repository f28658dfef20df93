//! Heading anchor ids.
//!
//! Every heading yields an anchor id: the explicit override when the author
//! set one, otherwise a slugified form of the text disambiguated with a
//! counter. [`IdAllocator`] implements the counter scheme; [`collect_anchors`]
//! computes a document's anchor set at parse time; [`AnchorIndex`] is the
//! corpus-wide lookup used for link validation.

use std::collections::{BTreeSet, HashMap};

use crate::document::Document;
use crate::key::DocKey;
use crate::node::{ContentNode, for_each_node};

/// Convert heading text to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics and collapses runs of other characters
/// into single dashes. Leading and trailing dashes are dropped.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Allocates anchor ids within one document.
///
/// Generated slugs are disambiguated with a counter (`setup`, `setup-1`,
/// `setup-2`, ...). Explicit override ids are returned verbatim - collisions
/// between explicit ids are the author's to fix and are reported by the
/// validator, not silently renamed here.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counts: HashMap<String, u32>,
}

impl IdAllocator {
    /// Create a fresh allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the anchor id for a heading.
    pub fn assign(&mut self, text: &str, explicit: Option<&str>) -> String {
        if let Some(id) = explicit {
            return id.to_owned();
        }

        let base = slugify(text);
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        }
    }
}

/// Collect the anchor set of a content tree.
///
/// Walks the tree in document order, including conditional branches (links
/// may target headings that exist only for some SDKs). Embeds are not
/// expanded here; fragment headings receive ids after splicing.
#[must_use]
pub fn collect_anchors(nodes: &[ContentNode]) -> BTreeSet<String> {
    let mut allocator = IdAllocator::new();
    let mut anchors = BTreeSet::new();

    for_each_node(nodes, &mut |node| {
        if let ContentNode::Heading { text, id, .. } = node {
            anchors.insert(allocator.assign(text, id.as_deref()));
        }
    });

    anchors
}

/// Corpus-wide lookup of document anchor sets.
///
/// Built once per build pass from every loaded document and consulted by
/// link validation for existence and anchor checks.
#[derive(Clone, Debug, Default)]
pub struct AnchorIndex {
    anchors: HashMap<DocKey, BTreeSet<String>>,
}

impl AnchorIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a collection of documents.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut index = Self::new();
        for doc in documents {
            index.insert(doc.key.clone(), doc.anchors().clone());
        }
        index
    }

    /// Register a document's anchor set.
    pub fn insert(&mut self, key: DocKey, anchors: BTreeSet<String>) {
        self.anchors.insert(key, anchors);
    }

    /// Whether the corpus contains a document with this key.
    #[must_use]
    pub fn contains_doc(&self, key: &DocKey) -> bool {
        self.anchors.contains_key(key)
    }

    /// Whether `doc` exists and exposes `anchor`.
    #[must_use]
    pub fn has_anchor(&self, doc: &DocKey, anchor: &str) -> bool {
        self.anchors
            .get(doc)
            .is_some_and(|set| set.contains(anchor))
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
