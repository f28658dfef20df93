//! Conditional-block SDK filters.

use serde::{Deserialize, Serialize};

use crate::Sdk;

/// The SDK filter attached to a conditional content block.
///
/// A block tagged `sdks=[react, swift]` is visible only when rendering for
/// one of the listed SDKs; with `negated` set, visibility inverts (visible
/// for every SDK *except* the listed ones).
///
/// Whether the listed identifiers are actually valid for the enclosing
/// document is checked by the validator, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkFilter {
    /// Listed identifiers, in author order.
    pub sdks: Vec<Sdk>,
    /// Invert the filter (`not in` semantics).
    #[serde(default)]
    pub negated: bool,
}

impl SdkFilter {
    /// Create a positive filter over the given identifiers.
    #[must_use]
    pub fn new(sdks: Vec<Sdk>) -> Self {
        Self {
            sdks,
            negated: false,
        }
    }

    /// Create a negated filter over the given identifiers.
    #[must_use]
    pub fn negated(sdks: Vec<Sdk>) -> Self {
        Self {
            sdks,
            negated: true,
        }
    }

    /// Whether a block with this filter is visible when rendering for `sdk`.
    #[must_use]
    pub fn matches(&self, sdk: &Sdk) -> bool {
        self.sdks.contains(sdk) != self.negated
    }

    /// Iterate the listed identifiers.
    pub fn iter(&self) -> impl Iterator<Item = &Sdk> {
        self.sdks.iter()
    }
}
