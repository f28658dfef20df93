//! The source seam.
//!
//! File enumeration and reading belong to the excluded I/O layer; the
//! pipeline consumes them through the [`Source`] trait. Keys follow the
//! URL-path convention of `dx-content` - the mapping from files to keys is
//! the implementation's business.

use dx_content::{DocKey, FragKey};

use crate::event::ChangeReceiver;
use crate::store::SourceKey;

/// Everything a source exposes for one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceListing {
    /// Document keys.
    pub documents: Vec<DocKey>,
    /// Fragment keys.
    pub fragments: Vec<FragKey>,
}

/// Error from the source layer.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The key does not exist.
    #[error("source not found: {0}")]
    NotFound(String),
    /// The backend failed to read.
    #[error("source read failed for '{key}': {message}")]
    Read {
        /// Offending key.
        key: String,
        /// Backend message.
        message: String,
    },
}

/// Abstraction over raw source enumeration and reading.
pub trait Source: Send + Sync {
    /// Enumerate every document and fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if enumeration fails.
    fn list(&self) -> Result<SourceListing, SourceError>;

    /// Read the raw content of one source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] for unknown keys.
    fn read(&self, key: &SourceKey) -> Result<String, SourceError>;

    /// Subscribe to change events.
    ///
    /// The default implementation never yields events; backends without
    /// change notification keep it.
    fn watch(&self) -> ChangeReceiver {
        let (_tx, rx) = std::sync::mpsc::channel();
        ChangeReceiver::new(rx)
    }
}
