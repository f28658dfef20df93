//! Stable keys for documents and fragments.
//!
//! Keys are URL-style paths without leading slash (e.g. `"guides/setup"`).
//! The mapping from source files to keys is owned by the source layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key identifying a document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocKey(String);

impl DocKey {
    /// Create a key from a path-like string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Stable key identifying a reusable fragment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragKey(String);

impl FragKey {
    /// Create a key from a path-like string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FragKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
