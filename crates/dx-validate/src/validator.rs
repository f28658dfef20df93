//! Validation entry point.

use std::fmt;

use dx_content::{AnchorIndex, ContentNode, Document, for_each_node};
use dx_scope::ScopedManifest;
use dx_sdk::Sdk;
use dx_store::{ContentStore, SourceKey};

use crate::conditional::evaluate_conditionals;
use crate::diagnostics::{Diagnostic, Severity};
use crate::embed::splice_fragments;
use crate::headings::assign_heading_ids;
use crate::links::validate_links;

/// The build target a tree is specialized for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    /// The generic output, valid for all SDKs.
    Core,
    /// One SDK-specific variant.
    Sdk(Sdk),
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => f.write_str("core"),
            Self::Sdk(sdk) => f.write_str(sdk.as_str()),
        }
    }
}

/// Validation configuration.
#[derive(Clone, Copy, Debug)]
pub struct ValidateOptions {
    /// Severity applied to reference-class diagnostics (broken links,
    /// missing anchors/fragments, filter/scope mismatches). Structural
    /// diagnostics are always errors.
    pub reference_severity: Severity,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            reference_severity: Severity::Error,
        }
    }
}

/// Result of validating one document for one target.
#[derive(Clone, Debug)]
pub struct ValidatedDocument {
    /// Validated, rewritten, target-specialized content tree.
    pub tree: Vec<ContentNode>,
    /// Everything found along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidatedDocument {
    /// Whether any diagnostic is a hard failure.
    #[must_use]
    pub fn has_hard_failures(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Whether validation produced no diagnostics at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate a document and produce its tree for one build target.
///
/// Runs the four passes in order: fragment embedding, link validation,
/// conditional evaluation, heading-id assignment. Prior dependency edges
/// for the document are cleared first, so edges removed from the source
/// stop triggering invalidation.
#[must_use]
pub fn validate_and_embed(
    doc: &Document,
    scoped: &ScopedManifest,
    store: &ContentStore,
    anchors: &AnchorIndex,
    target: &RenderTarget,
    options: &ValidateOptions,
) -> ValidatedDocument {
    store
        .dependencies()
        .clear_dependent(&SourceKey::Doc(doc.key.clone()));

    let severity = options.reference_severity;
    let mut diagnostics = Vec::new();

    let tree = splice_fragments(&doc.key, &doc.content, store, severity, &mut diagnostics);

    // Spliced fragments may introduce conditional blocks the document
    // itself does not have; the duplicate-id exemption must see them.
    let has_conditionals = doc.has_conditionals() || contains_conditional(&tree);

    let tree = validate_links(&tree, scoped, anchors, severity, &mut diagnostics);
    let tree = evaluate_conditionals(
        &tree,
        doc.declared_sdks(),
        scoped.scope_of(&doc.key),
        &scoped.universe,
        target,
        severity,
        &mut diagnostics,
    );
    let tree = assign_heading_ids(&tree, has_conditionals, &mut diagnostics);

    tracing::debug!(
        doc = %doc.key,
        target = %target,
        diagnostics = diagnostics.len(),
        "validated"
    );

    ValidatedDocument { tree, diagnostics }
}

fn contains_conditional(nodes: &[ContentNode]) -> bool {
    let mut found = false;
    for_each_node(nodes, &mut |node| {
        if matches!(node, ContentNode::Conditional { .. }) {
            found = true;
        }
    });
    found
}
