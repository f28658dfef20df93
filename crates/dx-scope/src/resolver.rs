//! The two-pass scope resolver.
//!
//! Pass 1 walks the tree top-down carrying the nearest ancestor declaration,
//! checking every explicit declaration against it. Pass 2 aggregates
//! bottom-up: a group's children union is computed, a union covering the
//! whole universe normalizes the group to "unrestricted", and an explicit
//! group declaration otherwise wins over the union. Both passes are
//! implemented as one recursion - the descent is Pass 1, the return path is
//! Pass 2, which also gives the bottom-up barrier per subtree for free.
//!
//! The resolver is pure: same manifest and declarations, same resolution.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use dx_content::DocKey;
use dx_manifest::{Manifest, NavNode};
use dx_sdk::{SdkSet, SdkUniverse};

use crate::error::ScopeConflict;
use crate::scoped::{ScopedManifest, ScopedNode};

/// Per-document declared SDK affinity, from frontmatter.
///
/// An absent key means the document carries no declaration. A present empty
/// set is a conflict (a document must be valid for at least one SDK).
pub type DocScopes = HashMap<DocKey, SdkSet>;

/// Resolve the SDK scope of every navigation node and document.
///
/// # Errors
///
/// Returns every [`ScopeConflict`] found across the tree. Conflicts are
/// global and fatal: no partial resolution is produced.
pub fn resolve_scopes(
    manifest: &Manifest,
    doc_scopes: &DocScopes,
) -> Result<ScopedManifest, Vec<ScopeConflict>> {
    let mut resolution = Resolution {
        universe: &manifest.universe,
        doc_scopes,
        conflicts: Vec::new(),
        scopes: HashMap::new(),
    };

    let nav = manifest
        .nav
        .iter()
        .map(|node| resolution.resolve_node(node, None).0)
        .collect();

    if !resolution.conflicts.is_empty() {
        return Err(resolution.conflicts);
    }

    tracing::debug!(
        nodes = manifest.nav.len(),
        documents = resolution.scopes.len(),
        "scope resolution complete"
    );

    Ok(ScopedManifest::new(
        manifest.universe.clone(),
        nav,
        resolution.scopes,
    ))
}

struct Resolution<'a> {
    universe: &'a SdkUniverse,
    doc_scopes: &'a DocScopes,
    conflicts: Vec<ScopeConflict>,
    scopes: HashMap<DocKey, Option<SdkSet>>,
}

impl Resolution<'_> {
    /// Resolve one node against the nearest ancestor declaration.
    ///
    /// Returns the scoped node and its working set (`None` = all SDKs),
    /// which feeds the parent's Pass 2 union.
    fn resolve_node(
        &mut self,
        node: &NavNode,
        inherited: Option<&SdkSet>,
    ) -> (ScopedNode, Option<SdkSet>) {
        match node {
            NavNode::Leaf {
                title,
                doc,
                sdks,
                icon,
            } => {
                let working = self.resolve_leaf(doc, sdks.as_ref(), inherited);
                self.record_doc_scope(doc, working.as_ref());
                (
                    ScopedNode::Leaf {
                        title: title.clone(),
                        doc: doc.clone(),
                        resolved: working.clone(),
                        icon: icon.clone(),
                    },
                    working,
                )
            }
            NavNode::Group {
                title,
                sdks,
                collapsed,
                children,
            } => self.resolve_group(title, sdks.as_ref(), *collapsed, children, inherited),
        }
    }

    /// Pass 1 for a leaf: reconcile the target document's declaration (and
    /// the leaf's own manifest declaration) with the inherited scope.
    fn resolve_leaf(
        &mut self,
        doc: &DocKey,
        leaf_declared: Option<&SdkSet>,
        inherited: Option<&SdkSet>,
    ) -> Option<SdkSet> {
        if let Some(declared) = leaf_declared {
            self.check_known(doc.as_str(), declared);
            if let Some(parent) = inherited
                && !declared.is_subset(parent)
            {
                self.conflicts.push(ScopeConflict::DocFilteredByParent {
                    doc: doc.clone(),
                    declared: declared.clone(),
                    inherited: parent.clone(),
                });
            }
        }

        // The leaf's own declaration is the nearest scope the document
        // declaration must fit inside.
        let effective_parent = leaf_declared.or(inherited);

        let doc_declared = self.doc_scopes.get(doc);
        if let Some(declared) = doc_declared {
            self.check_known(doc.as_str(), declared);
            if declared.is_empty() {
                self.conflicts
                    .push(ScopeConflict::EmptyDeclaration { doc: doc.clone() });
            }
            if let Some(parent) = effective_parent
                && !declared.is_subset(parent)
            {
                self.conflicts.push(ScopeConflict::DocFilteredByParent {
                    doc: doc.clone(),
                    declared: declared.clone(),
                    inherited: parent.clone(),
                });
            }
        }

        doc_declared.or(effective_parent).cloned()
    }

    /// Pass 1 check and descent plus Pass 2 aggregation for a group.
    fn resolve_group(
        &mut self,
        title: &str,
        declared: Option<&SdkSet>,
        collapsed: bool,
        children: &[NavNode],
        inherited: Option<&SdkSet>,
    ) -> (ScopedNode, Option<SdkSet>) {
        if let Some(own) = declared {
            self.check_known(title, own);
            if let Some(parent) = inherited
                && !own.is_subset(parent)
            {
                self.conflicts.push(ScopeConflict::GroupFilteredByParent {
                    group: title.to_owned(),
                    declared: own.clone(),
                    inherited: parent.clone(),
                });
            }
        }

        let effective = declared.or(inherited);

        // Pass 2 union: `None` once any child is unrestricted.
        let mut union: Option<SdkSet> = Some(SdkSet::new());
        let mut scoped_children = Vec::with_capacity(children.len());
        for child in children {
            let (scoped, working) = self.resolve_node(child, effective);
            union = match (union, working) {
                (Some(acc), Some(child_set)) => Some(acc.union(&child_set)),
                _ => None,
            };
            scoped_children.push(scoped);
        }

        let resolved = if children.is_empty() {
            // No children to aggregate: declared-or-inherited, possibly nothing.
            effective.cloned()
        } else if union.as_ref().is_none_or(|u| u.covers(self.universe)) {
            // Children jointly support every SDK: the group is, by
            // definition, unrestricted.
            None
        } else if let Some(own) = declared {
            // Explicit declaration wins; children keep their own detail.
            Some(own.clone())
        } else {
            union
        };

        (
            ScopedNode::Group {
                title: title.to_owned(),
                resolved: resolved.clone(),
                collapsed,
                children: scoped_children,
            },
            resolved,
        )
    }

    /// Conflict for every declared identifier outside the universe.
    fn check_known(&mut self, context: &str, declared: &SdkSet) {
        for sdk in declared {
            if !self.universe.contains(sdk) {
                self.conflicts.push(ScopeConflict::UnknownSdk {
                    context: context.to_owned(),
                    sdk: sdk.clone(),
                });
            }
        }
    }

    /// Merge a leaf's working set into the flat document lookup.
    ///
    /// A document reachable from several navigation placements is valid
    /// wherever any of them is: entries union, and unrestricted wins.
    fn record_doc_scope(&mut self, doc: &DocKey, working: Option<&SdkSet>) {
        match self.scopes.entry(doc.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(working.cloned());
            }
            Entry::Occupied(mut entry) => {
                let merged = match (entry.get().as_ref(), working) {
                    (Some(a), Some(b)) => Some(a.union(b)),
                    _ => None,
                };
                entry.insert(merged);
            }
        }
    }
}
