//! Link validation pass.

use dx_content::{AnchorIndex, ContentNode, LinkTarget};
use dx_scope::ScopedManifest;

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};

/// Validate internal links and rewrite links into restricted documents.
///
/// Existence comes from the corpus anchor index; restriction comes from the
/// scoped manifest. A link into a restricted document is rewritten to an
/// SDK-aware link carrying the target's resolved set, so the rendering
/// layer can route the reader to the right variant.
pub(crate) fn validate_links(
    nodes: &[ContentNode],
    scoped: &ScopedManifest,
    anchors: &AnchorIndex,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ContentNode> {
    nodes
        .iter()
        .map(|node| match node {
            ContentNode::Link { text, target } => ContentNode::Link {
                text: text.clone(),
                target: check_target(target, scoped, anchors, reference_severity, diagnostics),
            },
            ContentNode::Paragraph { children } => ContentNode::Paragraph {
                children: validate_links(children, scoped, anchors, reference_severity, diagnostics),
            },
            ContentNode::Conditional { filter, children } => ContentNode::Conditional {
                filter: filter.clone(),
                children: validate_links(children, scoped, anchors, reference_severity, diagnostics),
            },
            ContentNode::Heading { .. }
            | ContentNode::Text { .. }
            | ContentNode::CodeBlock { .. }
            | ContentNode::Embed { .. } => node.clone(),
        })
        .collect()
}

fn check_target(
    target: &LinkTarget,
    scoped: &ScopedManifest,
    anchors: &AnchorIndex,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
) -> LinkTarget {
    let LinkTarget::Internal { doc, anchor } = target else {
        return target.clone();
    };

    if !anchors.contains_doc(doc) {
        diagnostics.push(Diagnostic::reference(
            DiagnosticCode::LinkDocNotFound,
            reference_severity,
            format!("link target '{doc}' does not exist"),
        ));
        return target.clone();
    }

    if let Some(anchor) = anchor
        && !anchors.has_anchor(doc, anchor)
    {
        diagnostics.push(Diagnostic::reference(
            DiagnosticCode::LinkHashNotFound,
            reference_severity,
            format!("'{doc}' has no heading anchor '#{anchor}'"),
        ));
        return target.clone();
    }

    match scoped.scope_of(doc) {
        Some(sdks) => LinkTarget::SdkAware {
            doc: doc.clone(),
            anchor: anchor.clone(),
            sdks: sdks.clone(),
        },
        None => target.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_content::DocKey;
    use dx_manifest::Manifest;
    use dx_scope::{DocScopes, resolve_scopes};
    use dx_sdk::{Sdk, SdkSet};
    use pretty_assertions::assert_eq;

    fn scoped_fixture() -> ScopedManifest {
        // "restricted" is react-only; "open" is unrestricted
        let manifest = Manifest::from_yaml(
            "sdks: [react, swift]\nnav:\n  - title: Open\n    href: open\n  - title: Restricted\n    href: restricted\n",
        )
        .unwrap();
        let doc_scopes: DocScopes = [(
            DocKey::new("restricted"),
            [Sdk::new("react")].into_iter().collect::<SdkSet>(),
        )]
        .into_iter()
        .collect();
        resolve_scopes(&manifest, &doc_scopes).unwrap()
    }

    fn anchors_fixture() -> AnchorIndex {
        let mut anchors = AnchorIndex::new();
        anchors.insert(DocKey::new("open"), ["setup".to_owned()].into());
        anchors.insert(DocKey::new("restricted"), ["hooks".to_owned()].into());
        anchors
    }

    fn link(doc: &str, anchor: Option<&str>) -> ContentNode {
        ContentNode::Link {
            text: "see".to_owned(),
            target: LinkTarget::Internal {
                doc: DocKey::new(doc),
                anchor: anchor.map(str::to_owned),
            },
        }
    }

    #[test]
    fn test_valid_link_with_anchor_passes_clean() {
        let mut diagnostics = Vec::new();

        validate_links(
            &[link("open", Some("setup"))],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_document_reported() {
        let mut diagnostics = Vec::new();

        validate_links(
            &[link("nope", None)],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::LinkDocNotFound);
    }

    #[test]
    fn test_missing_anchor_reported_exactly_once() {
        let mut diagnostics = Vec::new();

        validate_links(
            &[link("open", Some("gone"))],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::LinkHashNotFound);
    }

    #[test]
    fn test_link_to_restricted_doc_is_rewritten() {
        let mut diagnostics = Vec::new();

        let tree = validate_links(
            &[link("restricted", Some("hooks"))],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
        let ContentNode::Link {
            target: LinkTarget::SdkAware { doc, anchor, sdks },
            ..
        } = &tree[0]
        else {
            panic!("expected SDK-aware link, got {:?}", tree[0]);
        };
        assert_eq!(doc, &DocKey::new("restricted"));
        assert_eq!(anchor.as_deref(), Some("hooks"));
        assert!(sdks.contains(&Sdk::new("react")));
        assert_eq!(sdks.len(), 1);
    }

    #[test]
    fn test_link_to_unrestricted_doc_is_untouched() {
        let mut diagnostics = Vec::new();

        let tree = validate_links(
            &[link("open", None)],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert!(matches!(
            &tree[0],
            ContentNode::Link {
                target: LinkTarget::Internal { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_external_links_pass_through() {
        let mut diagnostics = Vec::new();
        let node = ContentNode::Link {
            text: "docs".to_owned(),
            target: LinkTarget::External {
                url: "https://example.com".to_owned(),
            },
        };

        let tree = validate_links(
            &[node.clone()],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(tree, vec![node]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_links_inside_paragraphs_are_checked() {
        let mut diagnostics = Vec::new();

        validate_links(
            &[ContentNode::Paragraph {
                children: vec![link("nope", None)],
            }],
            &scoped_fixture(),
            &anchors_fixture(),
            Severity::Warning,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }
}
