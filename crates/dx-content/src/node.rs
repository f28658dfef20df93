//! The content tree.
//!
//! A closed tagged-variant tree with one variant per node kind. Validator
//! passes are written as recursions over this type with exhaustive matches,
//! so adding a variant surfaces every site that needs updating.

use serde::{Deserialize, Serialize};

use dx_sdk::{SdkFilter, SdkSet};

use crate::key::{DocKey, FragKey};

/// Target of a link node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinkTarget {
    /// Absolute URL outside the corpus; passed through untouched.
    External {
        /// Full URL.
        url: String,
    },
    /// Link to another document in the corpus, optionally to a heading.
    Internal {
        /// Target document key.
        doc: DocKey,
        /// Heading anchor id within the target (`#fragment` part).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<String>,
    },
    /// Internal link rewritten against a restricted target.
    ///
    /// Produced by link validation when the target document is valid only
    /// for a subset of SDKs; carries that subset so the rendering layer can
    /// route the reader to the correct variant.
    SdkAware {
        /// Target document key.
        doc: DocKey,
        /// Heading anchor id within the target.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<String>,
        /// SDKs the target is valid for.
        sdks: SdkSet,
    },
}

/// One node of the content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentNode {
    /// Section heading.
    Heading {
        /// Level 1-6.
        level: u8,
        /// Heading text.
        text: String,
        /// Explicit anchor id override; a slug is generated when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    /// Block of inline content.
    Paragraph {
        /// Inline children (text and links).
        children: Vec<ContentNode>,
    },
    /// Plain text run.
    Text {
        /// The text.
        text: String,
    },
    /// Link.
    Link {
        /// Display text.
        text: String,
        /// Target.
        target: LinkTarget,
    },
    /// Fenced code block.
    CodeBlock {
        /// Language tag, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Verbatim content.
        text: String,
    },
    /// Reference to a reusable fragment, spliced in by the validator.
    Embed {
        /// Fragment to splice.
        fragment: FragKey,
    },
    /// Content visible only for a subset of SDKs.
    Conditional {
        /// Visibility filter.
        filter: SdkFilter,
        /// Guarded children.
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Child nodes, for container variants.
    #[must_use]
    pub fn children(&self) -> &[ContentNode] {
        match self {
            Self::Paragraph { children } | Self::Conditional { children, .. } => children,
            Self::Heading { .. }
            | Self::Text { .. }
            | Self::Link { .. }
            | Self::CodeBlock { .. }
            | Self::Embed { .. } => &[],
        }
    }
}

/// Pre-order walk over a tree, descending into container variants.
pub fn for_each_node<'a, F>(nodes: &'a [ContentNode], f: &mut F)
where
    F: FnMut(&'a ContentNode),
{
    for node in nodes {
        f(node);
        for_each_node(node.children(), f);
    }
}
