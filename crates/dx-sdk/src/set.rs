//! Ordered SDK sets.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Sdk, SdkUniverse};

/// An ordered set of SDK identifiers.
///
/// Backed by a `BTreeSet` so iteration and serialization order are
/// deterministic regardless of insertion order. Scope resolution and output
/// generation rely on this for stable diffs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SdkSet(BTreeSet<Sdk>);

impl SdkSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, sdk: Sdk) -> bool {
        self.0.insert(sdk)
    }

    /// Whether `sdk` is a member.
    #[must_use]
    pub fn contains(&self, sdk: &Sdk) -> bool {
        self.0.contains(sdk)
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate members in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Sdk> {
        self.0.iter()
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Union of two sets as a new value.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Whether the set contains every identifier of `universe`.
    #[must_use]
    pub fn covers(&self, universe: &SdkUniverse) -> bool {
        universe.iter().all(|sdk| self.0.contains(sdk))
    }
}

impl fmt::Display for SdkSet {
    /// Formats as `[a, b, c]`, the form used in conflict messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, sdk) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(sdk.as_str())?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Sdk> for SdkSet {
    fn from_iter<I: IntoIterator<Item = Sdk>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SdkSet {
    type Item = &'a Sdk;
    type IntoIter = std::collections::btree_set::Iter<'a, Sdk>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
