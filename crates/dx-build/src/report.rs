//! Build reports.

use std::fmt::Write as _;

use dx_content::DocKey;
use dx_scope::ScopeConflict;
use dx_validate::Diagnostic;

use crate::output::OutputArtifact;

/// Per-document validation outcome.
#[derive(Clone, Debug)]
pub struct DocumentReport {
    /// The document.
    pub doc: DocKey,
    /// Diagnostics across every target the document was validated for.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    /// Whether any diagnostic fails this document.
    #[must_use]
    pub fn has_hard_failures(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Outcome of one build pass.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    /// Scope conflicts. Non-empty means the build aborted before
    /// validation: the scoped manifest would be unsound.
    pub conflicts: Vec<ScopeConflict>,
    /// Documents that failed to load or parse.
    pub load_errors: Vec<(DocKey, String)>,
    /// Per-document validation outcomes, in document order.
    pub documents: Vec<DocumentReport>,
    /// Emitted artifacts. Documents with hard failures emit nothing.
    pub artifacts: Vec<OutputArtifact>,
    /// Store revision the build read from. Watch mode compares this
    /// against the current revision to reject stale results.
    pub revision: u64,
}

impl BuildReport {
    /// Whether the build produced no hard failure anywhere.
    ///
    /// Warnings do not affect success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.conflicts.is_empty()
            && self.load_errors.is_empty()
            && !self.documents.iter().any(DocumentReport::has_hard_failures)
    }

    /// Number of documents with at least one hard failure.
    #[must_use]
    pub fn failed_document_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.has_hard_failures())
            .count()
    }

    /// Render every collected problem, grouped by document.
    ///
    /// The excluded CLI prints this and exits non-zero when
    /// [`is_success`](Self::is_success) is false.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for conflict in &self.conflicts {
            let _ = writeln!(out, "conflict[{}]: {conflict}", conflict.code());
        }

        for (doc, message) in &self.load_errors {
            let _ = writeln!(out, "{doc}: failed to load: {message}");
        }

        for report in &self.documents {
            if report.diagnostics.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{}:", report.doc);
            for diagnostic in &report.diagnostics {
                let level = if diagnostic.is_error() {
                    "error"
                } else {
                    "warning"
                };
                let _ = writeln!(
                    out,
                    "  {level}[{}]: {}",
                    diagnostic.code.as_str(),
                    diagnostic.message
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_validate::{DiagnosticCode, Severity};
    use pretty_assertions::assert_eq;

    fn warning_report(doc: &str) -> DocumentReport {
        DocumentReport {
            doc: DocKey::new(doc),
            diagnostics: vec![Diagnostic::reference(
                DiagnosticCode::LinkDocNotFound,
                Severity::Warning,
                "no such doc".to_owned(),
            )],
        }
    }

    #[test]
    fn test_warnings_do_not_affect_success() {
        let report = BuildReport {
            documents: vec![warning_report("guide")],
            ..BuildReport::default()
        };

        assert!(report.is_success());
        assert_eq!(report.failed_document_count(), 0);
    }

    #[test]
    fn test_hard_failure_fails_build() {
        let report = BuildReport {
            documents: vec![DocumentReport {
                doc: DocKey::new("guide"),
                diagnostics: vec![Diagnostic::structural(
                    DiagnosticCode::DuplicateHeadingId,
                    "duplicate heading id 'setup'".to_owned(),
                )],
            }],
            ..BuildReport::default()
        };

        assert!(!report.is_success());
        assert_eq!(report.failed_document_count(), 1);
    }

    #[test]
    fn test_render_text_groups_by_document() {
        let report = BuildReport {
            documents: vec![warning_report("guides/setup")],
            ..BuildReport::default()
        };

        let text = report.render_text();

        assert!(text.contains("guides/setup:"));
        assert!(text.contains("warning[link-doc-not-found]: no such doc"));
    }

    #[test]
    fn test_render_text_includes_conflicts() {
        let report = BuildReport {
            conflicts: vec![ScopeConflict::EmptyDeclaration {
                doc: DocKey::new("guide"),
            }],
            ..BuildReport::default()
        };

        let text = report.render_text();

        assert!(text.contains("conflict[empty-sdk-declaration]"));
        assert!(!report.is_success());
    }
}
