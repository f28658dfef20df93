//! Conditional-block evaluation pass.

use dx_content::ContentNode;
use dx_sdk::{SdkSet, SdkUniverse};

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::validator::RenderTarget;

/// Check conditional filters and specialize the tree for one build target.
///
/// Filter identifiers must be in the universe; when the document's own
/// scope or its manifest-assigned scope is restricted, each filtered SDK
/// must be a member. For a specific SDK target the decision is final:
/// matching blocks unwrap into their children, non-matching blocks are
/// removed. For the core target blocks stay wrapped - the rendering layer
/// evaluates them per reader.
pub(crate) fn evaluate_conditionals(
    nodes: &[ContentNode],
    doc_scope: Option<&SdkSet>,
    manifest_scope: Option<&SdkSet>,
    universe: &SdkUniverse,
    target: &RenderTarget,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ContentNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            ContentNode::Conditional { filter, children } => {
                check_filter(
                    filter,
                    doc_scope,
                    manifest_scope,
                    universe,
                    reference_severity,
                    diagnostics,
                );
                let children = evaluate_conditionals(
                    children,
                    doc_scope,
                    manifest_scope,
                    universe,
                    target,
                    reference_severity,
                    diagnostics,
                );
                match target {
                    RenderTarget::Core => out.push(ContentNode::Conditional {
                        filter: filter.clone(),
                        children,
                    }),
                    RenderTarget::Sdk(sdk) => {
                        if filter.matches(sdk) {
                            out.extend(children);
                        }
                        // Non-matching blocks vanish from this variant
                    }
                }
            }
            ContentNode::Paragraph { children } => out.push(ContentNode::Paragraph {
                children: evaluate_conditionals(
                    children,
                    doc_scope,
                    manifest_scope,
                    universe,
                    target,
                    reference_severity,
                    diagnostics,
                ),
            }),
            ContentNode::Heading { .. }
            | ContentNode::Text { .. }
            | ContentNode::Link { .. }
            | ContentNode::CodeBlock { .. }
            | ContentNode::Embed { .. } => out.push(node.clone()),
        }
    }

    out
}

fn check_filter(
    filter: &dx_sdk::SdkFilter,
    doc_scope: Option<&SdkSet>,
    manifest_scope: Option<&SdkSet>,
    universe: &SdkUniverse,
    reference_severity: Severity,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for sdk in filter.iter() {
        if !universe.contains(sdk) {
            diagnostics.push(Diagnostic::structural(
                DiagnosticCode::UnknownSdkFilter,
                format!("conditional block references unknown SDK '{sdk}'"),
            ));
            continue;
        }
        if let Some(scope) = doc_scope
            && !scope.contains(sdk)
        {
            diagnostics.push(Diagnostic::reference(
                DiagnosticCode::IfComponentSdkNotInFrontmatter,
                reference_severity,
                format!("conditional block filters on '{sdk}' outside the document scope {scope}"),
            ));
        }
        if let Some(scope) = manifest_scope
            && !scope.contains(sdk)
        {
            diagnostics.push(Diagnostic::reference(
                DiagnosticCode::IfComponentSdkNotInManifest,
                reference_severity,
                format!(
                    "conditional block filters on '{sdk}' outside the manifest scope {scope}"
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_sdk::{Sdk, SdkFilter};
    use pretty_assertions::assert_eq;

    fn universe() -> SdkUniverse {
        SdkUniverse::new(vec![Sdk::new("react"), Sdk::new("swift")]).unwrap()
    }

    fn set(ids: &[&str]) -> SdkSet {
        ids.iter().map(|id| Sdk::new(*id)).collect()
    }

    fn text(s: &str) -> ContentNode {
        ContentNode::Text { text: s.to_owned() }
    }

    fn conditional(ids: &[&str], children: Vec<ContentNode>) -> ContentNode {
        ContentNode::Conditional {
            filter: SdkFilter::new(ids.iter().map(|id| Sdk::new(*id)).collect()),
            children,
        }
    }

    #[test]
    fn test_sdk_target_unwraps_matching_block() {
        let mut diagnostics = Vec::new();

        let tree = evaluate_conditionals(
            &[conditional(&["react"], vec![text("react only")])],
            None,
            None,
            &universe(),
            &RenderTarget::Sdk(Sdk::new("react")),
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(tree, vec![text("react only")]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_sdk_target_removes_non_matching_block() {
        let mut diagnostics = Vec::new();

        let tree = evaluate_conditionals(
            &[conditional(&["react"], vec![text("react only")])],
            None,
            None,
            &universe(),
            &RenderTarget::Sdk(Sdk::new("swift")),
            Severity::Error,
            &mut diagnostics,
        );

        assert!(tree.is_empty());
    }

    #[test]
    fn test_core_target_keeps_blocks_wrapped() {
        let mut diagnostics = Vec::new();
        let input = vec![conditional(&["react"], vec![text("react only")])];

        let tree = evaluate_conditionals(
            &input,
            None,
            None,
            &universe(),
            &RenderTarget::Core,
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(tree, input);
    }

    #[test]
    fn test_negated_filter_inverts_visibility() {
        let mut diagnostics = Vec::new();
        let block = ContentNode::Conditional {
            filter: SdkFilter::negated(vec![Sdk::new("react")]),
            children: vec![text("everyone but react")],
        };

        let for_react = evaluate_conditionals(
            &[block.clone()],
            None,
            None,
            &universe(),
            &RenderTarget::Sdk(Sdk::new("react")),
            Severity::Error,
            &mut diagnostics,
        );
        let for_swift = evaluate_conditionals(
            &[block],
            None,
            None,
            &universe(),
            &RenderTarget::Sdk(Sdk::new("swift")),
            Severity::Error,
            &mut diagnostics,
        );

        assert!(for_react.is_empty());
        assert_eq!(for_swift, vec![text("everyone but react")]);
    }

    #[test]
    fn test_unknown_filter_sdk_is_structural() {
        let mut diagnostics = Vec::new();

        evaluate_conditionals(
            &[conditional(&["kotlin"], Vec::new())],
            None,
            None,
            &universe(),
            &RenderTarget::Core,
            Severity::Warning,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownSdkFilter);
        assert!(diagnostics[0].is_error()); // structural, regardless of config
    }

    #[test]
    fn test_filter_outside_document_scope_reported() {
        let mut diagnostics = Vec::new();

        evaluate_conditionals(
            &[conditional(&["swift"], Vec::new())],
            Some(&set(&["react"])),
            None,
            &universe(),
            &RenderTarget::Core,
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            DiagnosticCode::IfComponentSdkNotInFrontmatter
        );
    }

    #[test]
    fn test_filter_outside_manifest_scope_reported() {
        let mut diagnostics = Vec::new();

        evaluate_conditionals(
            &[conditional(&["swift"], Vec::new())],
            None,
            Some(&set(&["react"])),
            &universe(),
            &RenderTarget::Core,
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].code,
            DiagnosticCode::IfComponentSdkNotInManifest
        );
    }

    #[test]
    fn test_unrestricted_scopes_allow_any_known_filter() {
        let mut diagnostics = Vec::new();

        evaluate_conditionals(
            &[conditional(&["react", "swift"], Vec::new())],
            None,
            None,
            &universe(),
            &RenderTarget::Core,
            Severity::Error,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_nested_conditionals_evaluate_inner_first() {
        let mut diagnostics = Vec::new();
        let tree = evaluate_conditionals(
            &[conditional(
                &["react", "swift"],
                vec![conditional(&["react"], vec![text("react inner")])],
            )],
            None,
            None,
            &universe(),
            &RenderTarget::Sdk(Sdk::new("react")),
            Severity::Error,
            &mut diagnostics,
        );

        assert_eq!(tree, vec![text("react inner")]);
    }
}
