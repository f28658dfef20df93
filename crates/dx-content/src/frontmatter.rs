//! Document frontmatter.
//!
//! The YAML header block between `---` delimiters at the top of a source
//! file. Only the fields the pipeline consumes are modeled; unknown fields
//! are ignored so authors can carry presentation hints for other tooling.

use serde::{Deserialize, Serialize};

use dx_sdk::SdkSet;

/// Parsed frontmatter of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title.
    #[serde(default)]
    pub title: String,

    /// Page description for navigation and search surfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared SDK affinity. `None` means the document is unrestricted.
    ///
    /// An explicitly empty list is preserved as `Some(empty)` - the scope
    /// resolver rejects it, since a document must be valid for at least one
    /// SDK or carry no declaration at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdks: Option<SdkSet>,
}

impl Frontmatter {
    /// Parse frontmatter from YAML content.
    ///
    /// Empty content yields a default instance.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::Parse`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, FrontmatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| FrontmatterError::Parse(format!("invalid YAML: {e}")))
    }
}

/// Error type for frontmatter operations.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}

/// Split raw source text into its frontmatter block and body.
///
/// Returns `(Some(yaml), body)` when the text starts with a `---` line and a
/// closing `---` line exists; `(None, text)` otherwise. Content parsers call
/// this before handing the body to their own grammar.
#[must_use]
pub fn split_frontmatter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---\n").or_else(|| raw.strip_prefix("---\r\n")) else {
        return (None, raw);
    };

    for terminator in ["\n---\n", "\n---\r\n"] {
        if let Some(end) = rest.find(terminator) {
            return (Some(&rest[..end]), &rest[end + terminator.len()..]);
        }
    }
    // A final "---" with no trailing newline closes an empty-bodied document
    if let Some(yaml) = rest.strip_suffix("\n---") {
        return (Some(yaml), "");
    }

    (None, raw)
}
