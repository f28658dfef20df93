//! Resolved manifest types.

use std::collections::HashMap;

use serde::Serialize;

use dx_content::DocKey;
use dx_sdk::{SdkSet, SdkUniverse};

/// One node of the resolved navigation tree.
///
/// Mirrors the manifest tree with `resolved` computed for every node.
/// `None` means "valid for all SDKs" - kept as `None` rather than a full
/// set so downstream equality checks stay cheap and serialized output stays
/// compact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScopedNode {
    /// Resolved leaf.
    Leaf {
        /// Display title.
        title: String,
        /// Target document.
        doc: DocKey,
        /// Resolved SDK availability.
        #[serde(skip_serializing_if = "Option::is_none")]
        resolved: Option<SdkSet>,
        /// Decorative icon name, carried through.
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    /// Resolved group.
    Group {
        /// Display title.
        title: String,
        /// Resolved SDK availability.
        #[serde(skip_serializing_if = "Option::is_none")]
        resolved: Option<SdkSet>,
        /// Whether the group renders collapsed by default.
        collapsed: bool,
        /// Resolved children.
        children: Vec<ScopedNode>,
    },
}

impl ScopedNode {
    /// Resolved SDK availability (`None` = all SDKs).
    #[must_use]
    pub fn resolved(&self) -> Option<&SdkSet> {
        match self {
            Self::Leaf { resolved, .. } | Self::Group { resolved, .. } => resolved.as_ref(),
        }
    }
}

/// The fully resolved manifest: scoped tree plus flat document lookup.
///
/// An immutable value threaded through the validator and the build
/// pipeline; rebuilding computes a new value, never mutates this one.
#[derive(Clone, Debug)]
pub struct ScopedManifest {
    /// The SDK universe the resolution ran against.
    pub universe: SdkUniverse,
    /// Resolved navigation tree.
    pub nav: Vec<ScopedNode>,
    scopes: HashMap<DocKey, Option<SdkSet>>,
}

impl ScopedManifest {
    pub(crate) fn new(
        universe: SdkUniverse,
        nav: Vec<ScopedNode>,
        scopes: HashMap<DocKey, Option<SdkSet>>,
    ) -> Self {
        Self {
            universe,
            nav,
            scopes,
        }
    }

    /// The scope the manifest assigns to a document.
    ///
    /// `None` means unrestricted - either every navigation entry for the
    /// document resolved to "all SDKs", or the document is not listed in
    /// the manifest at all.
    #[must_use]
    pub fn scope_of(&self, doc: &DocKey) -> Option<&SdkSet> {
        self.scopes.get(doc).and_then(Option::as_ref)
    }

    /// Whether the manifest lists this document at all.
    #[must_use]
    pub fn is_listed(&self, doc: &DocKey) -> bool {
        self.scopes.contains_key(doc)
    }

    /// Number of documents the manifest references.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.scopes.len()
    }
}
