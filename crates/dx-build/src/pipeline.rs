//! The build pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;

use dx_config::{Config, ReferenceSeverity};
use dx_content::{AnchorIndex, DocKey, Document};
use dx_manifest::Manifest;
use dx_scope::{DocScopes, ScopedManifest, resolve_scopes};
use dx_store::{ContentStore, Source, SourceError};
use dx_validate::{Diagnostic, RenderTarget, Severity, ValidateOptions, validate_and_embed};

use crate::output::{OutputArtifact, emit_document, emit_stub};
use crate::report::{BuildReport, DocumentReport};

/// Fatal pipeline error. Everything per-document lands in the report
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source enumeration failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Build configuration.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Default severity for reference-class findings.
    pub reference_severity: Severity,
    /// Per-document severity overrides, keyed by document key.
    pub overrides: HashMap<String, Severity>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reference_severity: Severity::Error,
            overrides: HashMap::new(),
        }
    }
}

impl BuildOptions {
    /// Derive options from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let map = |severity: ReferenceSeverity| match severity {
            ReferenceSeverity::Warn => Severity::Warning,
            ReferenceSeverity::Error => Severity::Error,
        };
        Self {
            reference_severity: map(config.validation.references),
            overrides: config
                .validation
                .overrides
                .iter()
                .map(|(doc, severity)| (doc.clone(), map(*severity)))
                .collect(),
        }
    }
}

/// One full build: load, resolve, validate, emit.
///
/// Documents load and validate on a rayon pool; the store deduplicates
/// concurrent loads. The scope resolver runs to completion before any
/// validation starts - validator correctness depends on the fully resolved
/// scoped manifest.
pub struct Pipeline {
    source: Arc<dyn Source>,
    store: Arc<ContentStore>,
    manifest: Manifest,
    options: BuildOptions,
}

impl Pipeline {
    /// Assemble a pipeline.
    ///
    /// The `source` should be the same one the store's loader reads from.
    #[must_use]
    pub fn new(
        source: Arc<dyn Source>,
        store: Arc<ContentStore>,
        manifest: Manifest,
        options: BuildOptions,
    ) -> Self {
        Self {
            source,
            store,
            manifest,
            options,
        }
    }

    /// The content store backing this pipeline.
    #[must_use]
    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    /// Run one full build pass.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] only for source enumeration failure;
    /// per-document problems are collected in the report.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let started = std::time::Instant::now();
        let revision = self.store.revision();
        let listing = self.source.list()?;

        let loaded: Vec<_> = listing
            .documents
            .par_iter()
            .map(|key| (key.clone(), self.store.get_document(key)))
            .collect();

        let mut documents = Vec::new();
        let mut load_errors = Vec::new();
        for (key, result) in loaded {
            match result {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!(doc = %key, error = %e, "failed to load document");
                    load_errors.push((key, e.to_string()));
                }
            }
        }

        let mut doc_scopes = DocScopes::new();
        for doc in &documents {
            if let Some(declared) = doc.declared_sdks() {
                doc_scopes.insert(doc.key.clone(), declared.clone());
            }
        }

        let scoped = match resolve_scopes(&self.manifest, &doc_scopes) {
            Ok(scoped) => scoped,
            Err(conflicts) => {
                tracing::warn!(count = conflicts.len(), "scope conflicts, build aborted");
                return Ok(BuildReport {
                    conflicts,
                    load_errors,
                    revision,
                    ..BuildReport::default()
                });
            }
        };

        let anchors = AnchorIndex::from_documents(documents.iter().map(Arc::as_ref));

        let processed: Vec<_> = documents
            .par_iter()
            .map(|doc| self.process_document(doc, &scoped, &anchors))
            .collect();

        let mut reports = Vec::with_capacity(processed.len());
        let mut artifacts = Vec::new();
        for (report, mut doc_artifacts) in processed {
            reports.push(report);
            artifacts.append(&mut doc_artifacts);
        }

        tracing::info!(
            documents = reports.len(),
            artifacts = artifacts.len(),
            failed = reports.iter().filter(|r| r.has_hard_failures()).count(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "build complete"
        );

        Ok(BuildReport {
            conflicts: Vec::new(),
            load_errors,
            documents: reports,
            artifacts,
            revision,
        })
    }

    /// Validate one document for every applicable target and emit its
    /// artifacts.
    ///
    /// Unrestricted documents produce one core output. Restricted
    /// documents produce a redirect stub plus one variant per SDK in
    /// their resolved scope. A document with any hard failure emits
    /// nothing, but siblings are unaffected.
    fn process_document(
        &self,
        doc: &Document,
        scoped: &ScopedManifest,
        anchors: &AnchorIndex,
    ) -> (DocumentReport, Vec<OutputArtifact>) {
        let options = ValidateOptions {
            reference_severity: self.severity_for(&doc.key),
        };
        let scope = scoped.scope_of(&doc.key);
        let targets: Vec<RenderTarget> = match scope {
            None => vec![RenderTarget::Core],
            Some(sdks) => sdks.iter().cloned().map(RenderTarget::Sdk).collect(),
        };

        // Diagnostics repeat across variants (the same broken link breaks
        // in every variant); report each finding once.
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();
        let mut validated = Vec::with_capacity(targets.len());
        for target in targets {
            let result = validate_and_embed(doc, scoped, &self.store, anchors, &target, &options);
            for diagnostic in &result.diagnostics {
                if seen.insert((diagnostic.code, diagnostic.message.clone())) {
                    diagnostics.push(diagnostic.clone());
                }
            }
            validated.push((target, result));
        }

        let failed = diagnostics.iter().any(Diagnostic::is_error);
        let mut artifacts = Vec::new();
        if !failed {
            if let Some(sdks) = scope {
                artifacts.push(emit_stub(doc, sdks));
            }
            for (target, result) in &validated {
                artifacts.push(emit_document(doc, target, &result.tree));
            }
        }

        (
            DocumentReport {
                doc: doc.key.clone(),
                diagnostics,
            },
            artifacts,
        )
    }

    fn severity_for(&self, doc: &DocKey) -> Severity {
        self.options
            .overrides
            .get(doc.as_str())
            .copied()
            .unwrap_or(self.options.reference_severity)
    }
}
