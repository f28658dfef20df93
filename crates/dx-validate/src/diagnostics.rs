//! Validation diagnostics.

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, does not fail the build.
    Warning,
    /// Hard failure for the document.
    Error,
}

/// Machine-readable diagnostic codes.
///
/// Two classes: *reference* codes (broken link, missing anchor, missing
/// fragment, filter/scope mismatches) whose severity is configurable, and
/// *structural* codes (nested embed, unknown filter identifier, duplicate
/// heading id) which are always hard failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// Internal link to a document that does not exist.
    LinkDocNotFound,
    /// Internal link anchor missing from the target document.
    LinkHashNotFound,
    /// Embedded fragment not found.
    FragmentNotFound,
    /// Embed reference inside an already-spliced fragment.
    EmbedInFragment,
    /// Conditional filter names an SDK outside the universe.
    UnknownSdkFilter,
    /// Conditional filter names an SDK outside the document's own scope.
    IfComponentSdkNotInFrontmatter,
    /// Conditional filter names an SDK outside the manifest-assigned scope.
    IfComponentSdkNotInManifest,
    /// Two headings resolved to the same anchor id.
    DuplicateHeadingId,
}

impl DiagnosticCode {
    /// Stable kebab-case code string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinkDocNotFound => "link-doc-not-found",
            Self::LinkHashNotFound => "link-hash-not-found",
            Self::FragmentNotFound => "fragment-not-found",
            Self::EmbedInFragment => "embed-in-fragment",
            Self::UnknownSdkFilter => "unknown-sdk-filter",
            Self::IfComponentSdkNotInFrontmatter => "if-component-sdk-not-in-frontmatter",
            Self::IfComponentSdkNotInManifest => "if-component-sdk-not-in-manifest",
            Self::DuplicateHeadingId => "duplicate-heading-id",
        }
    }

    /// Whether this code is structural (always a hard failure).
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::EmbedInFragment | Self::UnknownSdkFilter | Self::DuplicateHeadingId
        )
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Machine-readable code.
    pub code: DiagnosticCode,
    /// Severity after applying configuration.
    pub severity: Severity,
    /// Human-readable context.
    pub message: String,
}

impl Diagnostic {
    /// A structural diagnostic (always an error).
    #[must_use]
    pub fn structural(code: DiagnosticCode, message: impl Into<String>) -> Self {
        debug_assert!(code.is_structural());
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// A reference diagnostic with configured severity.
    #[must_use]
    pub fn reference(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
        }
    }

    /// Whether this diagnostic fails the document.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
