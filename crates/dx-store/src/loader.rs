//! Loading and parsing seams.

use std::sync::Arc;

use dx_content::{DocKey, Document, FragKey, Fragment};

use crate::source::Source;
use crate::store::{SourceKey, SourceValue, StoreError};

/// Computes a store value for a key.
///
/// The store calls this on cache miss. Implementations must be safe to call
/// from multiple threads; the store guarantees at most one in-flight call
/// per key.
pub trait Loader: Send + Sync {
    /// Load and parse the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read or parse failure.
    fn load(&self, key: &SourceKey) -> Result<SourceValue, StoreError>;
}

/// Error from a content parser.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Parser message.
    pub message: String,
}

impl ParseError {
    /// Create a parse error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The raw-content parser seam.
///
/// Turning text into the structured content tree is an excluded
/// collaborator; the pipeline only depends on this trait.
pub trait ContentParser: Send + Sync {
    /// Parse a document (frontmatter plus content tree).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for malformed content.
    fn parse_document(&self, key: &DocKey, raw: &str) -> Result<Document, ParseError>;

    /// Parse a fragment (content tree only).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for malformed content.
    fn parse_fragment(&self, key: &FragKey, raw: &str) -> Result<Fragment, ParseError>;
}

/// Production loader: reads raw text from a [`Source`] and parses it.
pub struct SourceLoader {
    source: Arc<dyn Source>,
    parser: Arc<dyn ContentParser>,
}

impl SourceLoader {
    /// Combine a source and a parser.
    #[must_use]
    pub fn new(source: Arc<dyn Source>, parser: Arc<dyn ContentParser>) -> Self {
        Self { source, parser }
    }
}

impl Loader for SourceLoader {
    fn load(&self, key: &SourceKey) -> Result<SourceValue, StoreError> {
        let raw = self.source.read(key)?;
        let parse_error = |e: ParseError| StoreError::Parse {
            key: key.as_str().to_owned(),
            message: e.message,
        };

        match key {
            SourceKey::Doc(doc_key) => self
                .parser
                .parse_document(doc_key, &raw)
                .map(|doc| SourceValue::Document(Arc::new(doc)))
                .map_err(parse_error),
            SourceKey::Fragment(frag_key) => self
                .parser
                .parse_fragment(frag_key, &raw)
                .map(|frag| SourceValue::Fragment(Arc::new(frag)))
                .map_err(parse_error),
        }
    }
}
