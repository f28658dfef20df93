//! Output artifacts.
//!
//! One artifact per document per target. Unrestricted documents produce a
//! single core artifact at their canonical path. Restricted documents
//! produce a redirect stub at the canonical path plus one variant per SDK
//! nested under that SDK's path prefix.

use serde::Serialize;
use sha2::{Digest, Sha256};

use dx_content::{ContentNode, DocKey, Document};
use dx_sdk::SdkSet;
use dx_validate::RenderTarget;

/// One emitted output document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Output path, relative to the output root.
    pub path: String,
    /// JSON payload for the rendering layer.
    pub content: String,
    /// Hex SHA-256 of `content`, for cheap change detection.
    pub hash: String,
}

impl OutputArtifact {
    /// Build an artifact, hashing the content.
    #[must_use]
    pub fn new(path: String, content: String) -> Self {
        let hash = hex::encode(Sha256::digest(content.as_bytes()));
        Self {
            path,
            content,
            hash,
        }
    }
}

/// Output path for a document under a target.
///
/// Core output keeps the canonical path; SDK variants nest under the SDK's
/// prefix (`react/guides/setup`).
#[must_use]
pub fn artifact_path(doc: &DocKey, target: &RenderTarget) -> String {
    match target {
        RenderTarget::Core => doc.as_str().to_owned(),
        RenderTarget::Sdk(sdk) => format!("{sdk}/{doc}"),
    }
}

#[derive(Serialize)]
struct DocumentPayload<'a> {
    kind: &'static str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    target: String,
    tree: &'a [ContentNode],
}

#[derive(Serialize)]
struct StubPayload<'a> {
    kind: &'static str,
    title: &'a str,
    variants: Vec<StubVariant>,
}

#[derive(Serialize)]
struct StubVariant {
    sdk: String,
    path: String,
}

/// Emit the artifact for a validated tree.
pub(crate) fn emit_document(
    doc: &Document,
    target: &RenderTarget,
    tree: &[ContentNode],
) -> OutputArtifact {
    let payload = DocumentPayload {
        kind: "document",
        title: &doc.frontmatter.title,
        description: doc.frontmatter.description.as_deref(),
        target: target.to_string(),
        tree,
    };
    let content = serde_json::to_string(&payload).unwrap_or_default();
    OutputArtifact::new(artifact_path(&doc.key, target), content)
}

/// Emit the canonical-path redirect stub for a restricted document.
pub(crate) fn emit_stub(doc: &Document, sdks: &SdkSet) -> OutputArtifact {
    let payload = StubPayload {
        kind: "redirect-stub",
        title: &doc.frontmatter.title,
        variants: sdks
            .iter()
            .map(|sdk| StubVariant {
                sdk: sdk.as_str().to_owned(),
                path: format!("{sdk}/{}", doc.key),
            })
            .collect(),
    };
    let content = serde_json::to_string(&payload).unwrap_or_default();
    OutputArtifact::new(doc.key.as_str().to_owned(), content)
}
