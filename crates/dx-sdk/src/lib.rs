//! SDK identifier vocabulary for DX.
//!
//! Documentation content is shared across multiple client SDKs. This crate
//! provides the shared types for talking about them:
//!
//! - [`Sdk`]: a single SDK identifier
//! - [`SdkSet`]: an ordered set of identifiers with subset/union operations
//! - [`SdkUniverse`]: the closed enumeration of identifiers valid for a corpus
//! - [`SdkFilter`]: an (optionally negated) filter attached to conditional
//!   content blocks
//!
//! # Example
//!
//! ```
//! use dx_sdk::{Sdk, SdkSet, SdkUniverse};
//!
//! let universe = SdkUniverse::new(vec![Sdk::new("react"), Sdk::new("swift")]).unwrap();
//! let set: SdkSet = [Sdk::new("react")].into_iter().collect();
//!
//! assert!(universe.contains(&Sdk::new("react")));
//! assert!(!set.covers(&universe));
//! ```

mod filter;
mod set;

pub use filter::SdkFilter;
pub use set::SdkSet;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single client SDK identifier (e.g. `"react"`, `"swift"`).
///
/// Identifiers are opaque strings; validity against the corpus is checked
/// through [`SdkUniverse::contains`], not at construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sdk(String);

impl Sdk {
    /// Create an identifier from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sdk {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Error building an [`SdkUniverse`].
#[derive(Debug, thiserror::Error)]
pub enum UniverseError {
    /// The enumeration was empty.
    #[error("SDK universe must contain at least one identifier")]
    Empty,
    /// The same identifier appeared twice.
    #[error("duplicate SDK identifier: {0}")]
    Duplicate(Sdk),
}

/// The closed enumeration of SDK identifiers valid for one corpus.
///
/// Loaded alongside the navigation manifest. Order is the author's order and
/// is preserved for output-path generation and error messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkUniverse {
    sdks: Vec<Sdk>,
}

impl SdkUniverse {
    /// Build a universe from an ordered list of identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::Empty`] for an empty list and
    /// [`UniverseError::Duplicate`] if an identifier repeats.
    pub fn new(sdks: Vec<Sdk>) -> Result<Self, UniverseError> {
        if sdks.is_empty() {
            return Err(UniverseError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for sdk in &sdks {
            if !seen.insert(sdk.clone()) {
                return Err(UniverseError::Duplicate(sdk.clone()));
            }
        }
        Ok(Self { sdks })
    }

    /// Whether `sdk` is a member of this universe.
    #[must_use]
    pub fn contains(&self, sdk: &Sdk) -> bool {
        self.sdks.contains(sdk)
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sdks.len()
    }

    /// Whether the universe is empty (never true for a constructed universe).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sdks.is_empty()
    }

    /// Iterate identifiers in author order.
    pub fn iter(&self) -> impl Iterator<Item = &Sdk> {
        self.sdks.iter()
    }

    /// The full universe as an [`SdkSet`].
    #[must_use]
    pub fn as_set(&self) -> SdkSet {
        self.sdks.iter().cloned().collect()
    }
}
