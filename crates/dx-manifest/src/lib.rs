//! Navigation manifest for DX.
//!
//! The manifest is a hand-maintained YAML file declaring the navigation
//! tree and the closed enumeration of valid SDK identifiers:
//!
//! ```yaml
//! sdks: [react, swift]
//! nav:
//!   - title: Getting Started
//!     href: getting-started
//!   - title: Guides
//!     sdk: [react]
//!     collapse: true
//!     children:
//!       - title: Setup
//!         href: guides/setup
//! ```
//!
//! This crate provides the typed tree ([`NavNode`]) and the raw-YAML
//! loading/conversion ([`Manifest::from_yaml`]). Scope resolution over the
//! tree lives in `dx-scope`.

mod node;
mod yaml;

pub use node::NavNode;
pub use yaml::{Manifest, ManifestError};
