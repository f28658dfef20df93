//! Incremental rebuilds in watch mode.

use dx_store::{ChangeEvent, ChangeReceiver};

use crate::pipeline::{BuildError, Pipeline};
use crate::report::BuildReport;

/// Drives incremental rebuilds from source change events.
///
/// Each pump drains pending events, invalidates the store (cascades
/// included) before the next build pass reads from it, and rebuilds. A
/// build is never preempted mid-document, but a pass that was superseded -
/// events arrived during it, or the store revision moved under it - is
/// discarded and re-run rather than published. The in-memory cache makes
/// the re-run cheap: only invalidated entries recompute.
pub struct WatchLoop {
    pipeline: Pipeline,
    receiver: ChangeReceiver,
}

impl WatchLoop {
    /// Create a loop over a pipeline and an event receiver.
    #[must_use]
    pub fn new(pipeline: Pipeline, receiver: ChangeReceiver) -> Self {
        Self { pipeline, receiver }
    }

    /// The underlying pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Apply pending change events and rebuild.
    ///
    /// Returns `Ok(None)` when no events were pending.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if source enumeration fails.
    pub fn pump(&self) -> Result<Option<BuildReport>, BuildError> {
        let events = self.receiver.drain();
        if events.is_empty() {
            return Ok(None);
        }
        self.apply(&events);
        self.rebuild_stable().map(Some)
    }

    fn apply(&self, events: &[ChangeEvent]) {
        for event in events {
            tracing::debug!(key = %event.key, kind = ?event.kind, "source changed");
            self.pipeline.store().invalidate(&event.key);
        }
    }

    /// Build until a pass completes without being superseded.
    fn rebuild_stable(&self) -> Result<BuildReport, BuildError> {
        loop {
            let report = self.pipeline.build()?;

            let late_events = self.receiver.drain();
            if late_events.is_empty()
                && report.revision == self.pipeline.store().revision()
            {
                return Ok(report);
            }

            tracing::debug!("build superseded by newer change, rebuilding");
            self.apply(&late_events);
        }
    }
}
