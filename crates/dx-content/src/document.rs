//! Documents.

use std::collections::BTreeSet;

use dx_sdk::SdkSet;

use crate::anchor::collect_anchors;
use crate::frontmatter::Frontmatter;
use crate::key::DocKey;
use crate::node::{ContentNode, for_each_node};

/// A parsed document.
///
/// Immutable once constructed: the content store hands out shared references
/// and reprocessing always builds a fresh value. The anchor set and the
/// conditional-content flag are derived from the tree at construction so
/// later passes never re-walk for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Stable key (URL-style path).
    pub key: DocKey,
    /// Parsed frontmatter.
    pub frontmatter: Frontmatter,
    /// Content tree as produced by the parser (embeds not yet spliced).
    pub content: Vec<ContentNode>,
    anchors: BTreeSet<String>,
    has_conditionals: bool,
}

impl Document {
    /// Build a document from parsed parts, deriving the anchor set.
    #[must_use]
    pub fn new(key: DocKey, frontmatter: Frontmatter, content: Vec<ContentNode>) -> Self {
        let anchors = collect_anchors(&content);

        let mut has_conditionals = false;
        for_each_node(&content, &mut |node| {
            if matches!(node, ContentNode::Conditional { .. }) {
                has_conditionals = true;
            }
        });

        Self {
            key,
            frontmatter,
            content,
            anchors,
            has_conditionals,
        }
    }

    /// Heading anchor ids collected at parse time.
    ///
    /// Includes ids inside conditional branches; excludes fragment content,
    /// which is not spliced until validation.
    #[must_use]
    pub fn anchors(&self) -> &BTreeSet<String> {
        &self.anchors
    }

    /// Whether the content tree contains any conditional block.
    #[must_use]
    pub fn has_conditionals(&self) -> bool {
        self.has_conditionals
    }

    /// Declared SDK affinity from frontmatter, if any.
    #[must_use]
    pub fn declared_sdks(&self) -> Option<&SdkSet> {
        self.frontmatter.sdks.as_ref()
    }
}
