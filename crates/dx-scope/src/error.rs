//! Scope conflict taxonomy.

use dx_content::DocKey;
use dx_sdk::{Sdk, SdkSet};

/// A contradiction between SDK declarations in the manifest and documents.
///
/// Scope conflicts are always fatal to the whole build: the scoped manifest
/// would be unsound, so no validator work runs on top of it. The resolver
/// collects every conflict in one pass rather than stopping at the first.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeConflict {
    /// A document declares SDKs its parent navigation scope forbids.
    #[error("document '{doc}' declares {declared} but its parent scope allows only {inherited}")]
    DocFilteredByParent {
        /// Offending document.
        doc: DocKey,
        /// The document's declaration.
        declared: SdkSet,
        /// The inherited parent scope.
        inherited: SdkSet,
    },
    /// A group declares SDKs its parent navigation scope forbids.
    #[error("group '{group}' declares {declared} but its parent scope allows only {inherited}")]
    GroupFilteredByParent {
        /// Offending group title.
        group: String,
        /// The group's declaration.
        declared: SdkSet,
        /// The inherited parent scope.
        inherited: SdkSet,
    },
    /// A document declares an empty SDK set.
    ///
    /// A document must be valid for at least one SDK or carry no
    /// declaration at all.
    #[error("document '{doc}' declares an empty SDK set")]
    EmptyDeclaration {
        /// Offending document.
        doc: DocKey,
    },
    /// A declaration names an SDK outside the manifest's enumeration.
    #[error("'{context}' references unknown SDK '{sdk}'")]
    UnknownSdk {
        /// Offending document key or group title.
        context: String,
        /// The unrecognized identifier.
        sdk: Sdk,
    },
}

impl ScopeConflict {
    /// Stable machine-readable conflict code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocFilteredByParent { .. } => "doc-sdk-filtered-by-parent",
            Self::GroupFilteredByParent { .. } => "group-sdk-filtered-by-parent",
            Self::EmptyDeclaration { .. } => "empty-sdk-declaration",
            Self::UnknownSdk { .. } => "unknown-sdk",
        }
    }
}
