//! SDK scoping resolution for DX.
//!
//! Computes, for every navigation node and every document, the authoritative
//! set of SDKs it is valid for, reconciling explicit declarations against
//! constraints inherited from parent groups.
//!
//! The resolver is a pure function of the navigation manifest and the
//! per-document frontmatter declarations. It either produces a fully
//! resolved [`ScopedManifest`] or fails with every [`ScopeConflict`] found
//! across the tree - a partial resolution is never returned, because a
//! manifest with contradictions is unsound as a whole.
//!
//! # Example
//!
//! ```
//! use dx_content::DocKey;
//! use dx_manifest::Manifest;
//! use dx_scope::{DocScopes, resolve_scopes};
//!
//! let manifest = Manifest::from_yaml("sdks: [react]\nnav:\n  - title: Guide\n    href: guide\n").unwrap();
//! let scopes = DocScopes::new();
//!
//! let scoped = resolve_scopes(&manifest, &scopes).unwrap();
//! assert!(scoped.scope_of(&DocKey::new("guide")).is_none()); // unrestricted
//! ```

mod error;
mod resolver;
mod scoped;

pub use error::ScopeConflict;
pub use resolver::{DocScopes, resolve_scopes};
pub use scoped::{ScopedManifest, ScopedNode};
