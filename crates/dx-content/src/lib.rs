//! Content tree model for DX documents and fragments.
//!
//! This crate provides the parsed, immutable representation of authored
//! content:
//!
//! - [`ContentNode`]: closed tagged-variant content tree
//! - [`Document`]: a keyed page with frontmatter, content, and anchor set
//! - [`Fragment`]: a reusable snippet embeddable into documents
//! - [`Frontmatter`]: the YAML header block of a document
//! - [`AnchorIndex`]: corpus-wide lookup of heading anchors per document
//!
//! Values are never mutated in place. Reprocessing a document produces a
//! fresh value; validator passes map the tree into new trees.

mod anchor;
mod document;
mod fragment;
mod frontmatter;
mod key;
mod node;

pub use anchor::{AnchorIndex, IdAllocator, collect_anchors, slugify};
pub use document::Document;
pub use fragment::Fragment;
pub use frontmatter::{Frontmatter, FrontmatterError, split_frontmatter};
pub use key::{DocKey, FragKey};
pub use node::{ContentNode, LinkTarget, for_each_node};
