//! Incremental content store and dependency tracking for DX.
//!
//! This crate provides:
//!
//! - [`ContentStore`]: in-memory keyed cache of parsed documents and
//!   fragments, computing on miss via a [`Loader`] with single-flight
//!   deduplication, and cascading [`invalidate`](ContentStore::invalidate)
//!   through the [`DependencyTracker`]
//! - [`Source`]: the seam to the excluded file-enumeration layer, with an
//!   in-memory [`MemorySource`] for tests (feature `mock`)
//! - [`ContentParser`]: the seam to the excluded raw-content parser
//! - [`ChangeEvent`]: change notification types for watch mode
//!
//! # Ownership
//!
//! The store exclusively owns cached values; the tracker owns only key
//! pairs. Cached values are immutable and shared by reference
//! (`Arc<Document>` / `Arc<Fragment>`) - no defensive copies.

mod deps;
mod event;
mod loader;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;
mod store;

pub use deps::DependencyTracker;
pub use event::{ChangeEvent, ChangeKind, ChangeReceiver};
pub use loader::{ContentParser, Loader, ParseError, SourceLoader};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MemorySource, MockParser};
pub use source::{Source, SourceError, SourceListing};
pub use store::{ContentStore, SourceKey, SourceValue, StoreError};
