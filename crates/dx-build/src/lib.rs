//! Build pipeline orchestration for DX.
//!
//! This crate ties the pieces together:
//!
//! - [`Pipeline`]: one full build - load every document (in parallel),
//!   resolve SDK scopes, validate each document against the scoped
//!   manifest, and emit output artifacts
//! - [`OutputArtifact`]: one per-document, per-target output with a content
//!   hash
//! - [`BuildReport`]: every diagnostic grouped by document, plus success
//!   status
//! - [`WatchLoop`]: incremental rebuilds driven by change events, with
//!   stale-build rejection
//!
//! The scope resolver always runs to completion before any validation
//! starts; validator tasks then fan out over a rayon pool with the store
//! providing single-flight loading.

mod output;
mod pipeline;
mod report;
mod watch;

pub use output::{OutputArtifact, artifact_path};
pub use pipeline::{BuildError, BuildOptions, Pipeline};
pub use report::{BuildReport, DocumentReport};
pub use watch::WatchLoop;
