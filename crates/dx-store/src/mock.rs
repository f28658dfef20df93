//! In-memory source and parser for testing.
//!
//! [`MemorySource`] holds raw content in memory and supports change-event
//! injection for watch tests. [`MockParser`] reads a document as a YAML
//! frontmatter block followed by the content tree in JSON - enough to drive
//! the pipeline end-to-end without the real parser.

use std::collections::HashMap;
use std::sync::{RwLock, mpsc};

use dx_content::{ContentNode, DocKey, Document, FragKey, Fragment, Frontmatter, split_frontmatter};

use crate::event::{ChangeEvent, ChangeKind, ChangeReceiver};
use crate::loader::{ContentParser, ParseError};
use crate::source::{Source, SourceError, SourceListing};
use crate::store::SourceKey;

/// In-memory source for testing.
///
/// # Example
///
/// ```
/// use dx_store::{MemorySource, Source, SourceKey};
/// use dx_content::DocKey;
///
/// let source = MemorySource::new()
///     .with_document("guide", "---\ntitle: Guide\n---\n[]");
///
/// let listing = source.list().unwrap();
/// assert_eq!(listing.documents, vec![DocKey::new("guide")]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: RwLock<HashMap<DocKey, String>>,
    fragments: RwLock<HashMap<FragKey, String>>,
    event_sender: RwLock<Option<mpsc::Sender<ChangeEvent>>>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder style).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(DocKey::new(key), raw.into());
        self
    }

    /// Add a fragment (builder style).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_fragment(self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.fragments
            .write()
            .unwrap()
            .insert(FragKey::new(key), raw.into());
        self
    }

    /// Replace a document's content and emit a `Modified` event to any
    /// watcher.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn update_document(&self, key: &DocKey, raw: impl Into<String>) {
        self.documents
            .write()
            .unwrap()
            .insert(key.clone(), raw.into());
        self.emit(SourceKey::Doc(key.clone()), ChangeKind::Modified);
    }

    /// Replace a fragment's content and emit a `Modified` event to any
    /// watcher.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn update_fragment(&self, key: &FragKey, raw: impl Into<String>) {
        self.fragments
            .write()
            .unwrap()
            .insert(key.clone(), raw.into());
        self.emit(SourceKey::Fragment(key.clone()), ChangeKind::Modified);
    }

    fn emit(&self, key: SourceKey, kind: ChangeKind) {
        if let Some(tx) = self.event_sender.read().unwrap().as_ref() {
            let _ = tx.send(ChangeEvent { key, kind });
        }
    }
}

impl Source for MemorySource {
    fn list(&self) -> Result<SourceListing, SourceError> {
        let mut documents: Vec<_> = self.documents.read().unwrap().keys().cloned().collect();
        let mut fragments: Vec<_> = self.fragments.read().unwrap().keys().cloned().collect();
        documents.sort();
        fragments.sort();
        Ok(SourceListing {
            documents,
            fragments,
        })
    }

    fn read(&self, key: &SourceKey) -> Result<String, SourceError> {
        let content = match key {
            SourceKey::Doc(doc_key) => self.documents.read().unwrap().get(doc_key).cloned(),
            SourceKey::Fragment(frag_key) => {
                self.fragments.read().unwrap().get(frag_key).cloned()
            }
        };
        content.ok_or_else(|| SourceError::NotFound(key.as_str().to_owned()))
    }

    fn watch(&self) -> ChangeReceiver {
        let (tx, rx) = mpsc::channel();
        *self.event_sender.write().unwrap() = Some(tx);
        ChangeReceiver::new(rx)
    }
}

/// Test parser: YAML frontmatter plus JSON-encoded content tree.
#[derive(Debug, Default)]
pub struct MockParser;

impl MockParser {
    fn parse_tree(raw: &str) -> Result<Vec<ContentNode>, ParseError> {
        let body = raw.trim();
        if body.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(body).map_err(|e| ParseError::new(e.to_string()))
    }
}

impl ContentParser for MockParser {
    fn parse_document(&self, key: &DocKey, raw: &str) -> Result<Document, ParseError> {
        let (frontmatter, body) = split_frontmatter(raw);
        let frontmatter = match frontmatter {
            Some(yaml) => {
                Frontmatter::from_yaml(yaml).map_err(|e| ParseError::new(e.to_string()))?
            }
            None => Frontmatter::default(),
        };
        Ok(Document::new(key.clone(), frontmatter, Self::parse_tree(body)?))
    }

    fn parse_fragment(&self, key: &FragKey, raw: &str) -> Result<Fragment, ParseError> {
        Ok(Fragment::new(key.clone(), Self::parse_tree(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_source_read() {
        let source = MemorySource::new().with_document("guide", "body");

        let raw = source.read(&SourceKey::Doc(DocKey::new("guide"))).unwrap();

        assert_eq!(raw, "body");
    }

    #[test]
    fn test_memory_source_read_missing_is_not_found() {
        let source = MemorySource::new();

        let err = source.read(&SourceKey::Doc(DocKey::new("nope"))).unwrap_err();

        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_memory_source_update_emits_event() {
        let source = MemorySource::new().with_document("guide", "v1");
        let receiver = source.watch();

        source.update_document(&DocKey::new("guide"), "v2");

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.key, SourceKey::Doc(DocKey::new("guide")));
        assert_eq!(event.kind, ChangeKind::Modified);
    }

    #[test]
    fn test_mock_parser_document_with_frontmatter() {
        let raw = "---\ntitle: Guide\nsdks: [react]\n---\n[{\"kind\": \"text\", \"text\": \"hi\"}]";

        let doc = MockParser
            .parse_document(&DocKey::new("guide"), raw)
            .unwrap();

        assert_eq!(doc.frontmatter.title, "Guide");
        assert!(doc.declared_sdks().is_some());
        assert_eq!(doc.content.len(), 1);
    }

    #[test]
    fn test_mock_parser_fragment_without_frontmatter() {
        let frag = MockParser
            .parse_fragment(&FragKey::new("snippet"), "[]")
            .unwrap();

        assert!(frag.content.is_empty());
    }

    #[test]
    fn test_mock_parser_rejects_bad_json() {
        assert!(MockParser.parse_document(&DocKey::new("g"), "not json").is_err());
    }
}
