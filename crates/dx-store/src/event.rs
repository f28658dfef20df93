//! Change notification types for watch mode.
//!
//! The excluded I/O layer observes the filesystem and feeds [`ChangeEvent`]s
//! into a channel; the build layer drains them, invalidates the store, and
//! rebuilds. Within this crate only the types live - no watcher.

use std::sync::mpsc;

use crate::store::SourceKey;

/// Kind of source change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Source was created.
    Created,
    /// Source was modified.
    Modified,
    /// Source was removed.
    Removed,
}

/// A source change event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Key of the changed source.
    pub key: SourceKey,
    /// Kind of change.
    pub kind: ChangeKind,
}

/// Receiver for change events.
///
/// Wraps an [`mpsc::Receiver`] for synchronous delivery. Poll with
/// [`try_recv`](Self::try_recv) or block with [`recv`](Self::recv).
pub struct ChangeReceiver {
    rx: mpsc::Receiver<ChangeEvent>,
}

impl ChangeReceiver {
    /// Create a receiver from a channel receiver.
    #[must_use]
    pub fn new(rx: mpsc::Receiver<ChangeEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event. Returns `None` when the sender is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<ChangeEvent> {
        self.rx.recv().ok()
    }

    /// Receive without blocking. Returns `None` if no event is pending.
    #[must_use]
    pub fn try_recv(&self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }

    /// Drain every pending event without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<ChangeEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}
