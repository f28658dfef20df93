//! Fragment embedding pass.

use dx_content::{ContentNode, DocKey};
use dx_store::{ContentStore, SourceKey};

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};

/// Splice every fragment embed into the tree.
///
/// Each resolved embed records a dependency edge in the store's tracker.
/// Embedding depth is capped at 1: an embed found inside already-spliced
/// fragment content is a structural failure and is dropped from the tree.
pub(crate) fn splice_fragments(
    doc: &DocKey,
    nodes: &[ContentNode],
    store: &ContentStore,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ContentNode> {
    splice(doc, nodes, store, reference_severity, diagnostics, false)
}

fn splice(
    doc: &DocKey,
    nodes: &[ContentNode],
    store: &ContentStore,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
    inside_fragment: bool,
) -> Vec<ContentNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            ContentNode::Embed { fragment } => {
                if inside_fragment {
                    diagnostics.push(Diagnostic::structural(
                        DiagnosticCode::EmbedInFragment,
                        format!("fragment '{fragment}' is embedded from another fragment"),
                    ));
                    continue;
                }
                match store.get_fragment(fragment) {
                    Ok(frag) => {
                        store.dependencies().record(
                            SourceKey::Doc(doc.clone()),
                            SourceKey::Fragment(fragment.clone()),
                        );
                        out.extend(splice(
                            doc,
                            &frag.content,
                            store,
                            reference_severity,
                            diagnostics,
                            true,
                        ));
                    }
                    Err(e) => {
                        diagnostics.push(Diagnostic::reference(
                            DiagnosticCode::FragmentNotFound,
                            reference_severity,
                            format!("fragment '{fragment}' could not be loaded: {e}"),
                        ));
                    }
                }
            }
            ContentNode::Paragraph { children } => out.push(ContentNode::Paragraph {
                children: splice(
                    doc,
                    children,
                    store,
                    reference_severity,
                    diagnostics,
                    inside_fragment,
                ),
            }),
            ContentNode::Conditional { filter, children } => out.push(ContentNode::Conditional {
                filter: filter.clone(),
                children: splice(
                    doc,
                    children,
                    store,
                    reference_severity,
                    diagnostics,
                    inside_fragment,
                ),
            }),
            ContentNode::Heading { .. }
            | ContentNode::Text { .. }
            | ContentNode::Link { .. }
            | ContentNode::CodeBlock { .. } => out.push(node.clone()),
        }
    }

    out
}
