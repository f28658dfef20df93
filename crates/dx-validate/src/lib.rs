//! Reference and embedding validation for DX documents.
//!
//! [`validate_and_embed`] takes a parsed document, the resolved scoped
//! manifest, the content store, and the corpus anchor index, and produces a
//! validated, rewritten content tree plus diagnostics for one build target.
//!
//! # Architecture
//!
//! Validation runs as four independent passes over the immutable content
//! tree, each returning a new tree:
//!
//! 1. **Embedding** - fragment references are resolved through the store
//!    (recording dependency edges) and spliced in place
//! 2. **Links** - internal links are checked for document and anchor
//!    existence; links into restricted documents are rewritten to carry the
//!    target's SDK set
//! 3. **Conditionals** - SDK filters are checked against the universe, the
//!    document's own scope, and its manifest scope; blocks are kept,
//!    unwrapped, or removed depending on the build target
//! 4. **Headings** - every heading gets its final anchor id; duplicate ids
//!    are rejected
//!
//! Diagnostics are collected, never thrown: one run reports every problem
//! in the document.

mod conditional;
mod diagnostics;
mod embed;
mod headings;
mod links;
mod validator;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use validator::{RenderTarget, ValidateOptions, ValidatedDocument, validate_and_embed};
