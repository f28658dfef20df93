//! Heading-id assignment and uniqueness pass.

use std::collections::HashSet;

use dx_content::{ContentNode, IdAllocator};

use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// Assign the final anchor id to every heading in the spliced tree.
///
/// Ids are the explicit override when present, else a slugified,
/// counter-disambiguated form of the heading text. A duplicate id is a
/// structural failure - unless the document contains conditional blocks,
/// since only one branch survives in any rendered variant and apparent
/// duplicates across branches are not real.
pub(crate) fn assign_heading_ids(
    nodes: &[ContentNode],
    doc_has_conditionals: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ContentNode> {
    let mut allocator = IdAllocator::new();
    let mut seen = HashSet::new();
    assign(
        nodes,
        &mut allocator,
        &mut seen,
        doc_has_conditionals,
        diagnostics,
    )
}

fn assign(
    nodes: &[ContentNode],
    allocator: &mut IdAllocator,
    seen: &mut HashSet<String>,
    doc_has_conditionals: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ContentNode> {
    nodes
        .iter()
        .map(|node| match node {
            ContentNode::Heading { level, text, id } => {
                let assigned = allocator.assign(text, id.as_deref());
                if !seen.insert(assigned.clone()) && !doc_has_conditionals {
                    diagnostics.push(Diagnostic::structural(
                        DiagnosticCode::DuplicateHeadingId,
                        format!("duplicate heading id '{assigned}'"),
                    ));
                }
                ContentNode::Heading {
                    level: *level,
                    text: text.clone(),
                    id: Some(assigned),
                }
            }
            ContentNode::Paragraph { children } => ContentNode::Paragraph {
                children: assign(children, allocator, seen, doc_has_conditionals, diagnostics),
            },
            ContentNode::Conditional { filter, children } => ContentNode::Conditional {
                filter: filter.clone(),
                children: assign(children, allocator, seen, doc_has_conditionals, diagnostics),
            },
            ContentNode::Text { .. }
            | ContentNode::Link { .. }
            | ContentNode::CodeBlock { .. }
            | ContentNode::Embed { .. } => node.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(text: &str, id: Option<&str>) -> ContentNode {
        ContentNode::Heading {
            level: 2,
            text: text.to_owned(),
            id: id.map(str::to_owned),
        }
    }

    fn assigned_ids(tree: &[ContentNode]) -> Vec<String> {
        let mut ids = Vec::new();
        dx_content::for_each_node(tree, &mut |node| {
            if let ContentNode::Heading { id, .. } = node {
                ids.push(id.clone().unwrap());
            }
        });
        ids
    }

    #[test]
    fn test_generated_ids_are_counter_disambiguated() {
        let mut diagnostics = Vec::new();

        let tree = assign_heading_ids(
            &[heading("Setup", None), heading("Setup", None)],
            false,
            &mut diagnostics,
        );

        assert_eq!(assigned_ids(&tree), vec!["setup", "setup-1"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_explicit_duplicate_is_structural_failure() {
        let mut diagnostics = Vec::new();

        assign_heading_ids(
            &[heading("A", Some("dup")), heading("B", Some("dup"))],
            false,
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateHeadingId);
        assert!(diagnostics[0].message.contains("dup"));
    }

    #[test]
    fn test_duplicates_tolerated_when_document_has_conditionals() {
        let mut diagnostics = Vec::new();

        assign_heading_ids(
            &[heading("A", Some("dup")), heading("B", Some("dup"))],
            true,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_headings_inside_conditionals_get_ids() {
        use dx_sdk::{Sdk, SdkFilter};
        let mut diagnostics = Vec::new();

        let tree = assign_heading_ids(
            &[ContentNode::Conditional {
                filter: SdkFilter::new(vec![Sdk::new("react")]),
                children: vec![heading("Hooks", None)],
            }],
            true,
            &mut diagnostics,
        );

        assert_eq!(assigned_ids(&tree), vec!["hooks"]);
    }
}
