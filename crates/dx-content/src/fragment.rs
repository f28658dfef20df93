//! Reusable fragments.

use crate::key::FragKey;
use crate::node::ContentNode;

/// A reusable content snippet.
///
/// Same tree shape as a document's content, minus frontmatter. A fragment
/// carries no SDK scope of its own - conditional blocks inside it are
/// evaluated with the scope of the *including* document. Fragments may not
/// embed other fragments; the validator rejects nested embeds when splicing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Stable key.
    pub key: FragKey,
    /// Content tree.
    pub content: Vec<ContentNode>,
}

impl Fragment {
    /// Build a fragment from parsed content.
    #[must_use]
    pub fn new(key: FragKey, content: Vec<ContentNode>) -> Self {
        Self { key, content }
    }
}
