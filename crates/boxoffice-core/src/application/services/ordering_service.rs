//! Question reordering flow
//!
//! Recomputes dense order values after a completed drag gesture and
//! replaces the whole order server-side.

use crate::application::write_gate::{WriteGate, WriteOutcome, WriteTarget};
use crate::application::ApplicationResult;
use crate::domain::ports::QuestionOrderStore;
use crate::domain::services::resequencer::{resequence, OrderUpdate};
use crate::domain::value_objects::{EventId, QuestionId, SnapshotVersion};
use parking_lot::Mutex;
use tracing::debug;

/// Drives question reorders to the order store
pub struct OrderingService<S> {
    store: S,
    gate: Mutex<WriteGate>,
}

impl<S: QuestionOrderStore> OrderingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: Mutex::new(WriteGate::new()),
        }
    }

    /// Snapshot version the next reorder for `event` should be computed
    /// against
    pub fn snapshot_version(&self, event: &EventId) -> SnapshotVersion {
        self.gate
            .lock()
            .current_version(&WriteTarget::event(event.clone()))
    }

    /// Resequence `desired` and replace the event's question order.
    ///
    /// Returns the emitted assignments on success. A reorder computed
    /// against a superseded snapshot is rejected rather than applied.
    pub async fn apply(
        &self,
        event: &EventId,
        desired: &[QuestionId],
        computed_against: SnapshotVersion,
    ) -> ApplicationResult<Vec<OrderUpdate<QuestionId>>> {
        let updates = resequence(desired);
        let target = WriteTarget::event(event.clone());
        let ticket = self.gate.lock().begin(target, computed_against)?;
        debug!(%event, questions = updates.len(), "replacing question order");
        match self.store.replace_order(event, updates.clone()).await {
            Ok(()) => {
                self.gate.lock().complete(ticket, WriteOutcome::Applied);
                Ok(updates)
            }
            Err(err) => {
                self.gate.lock().complete(ticket, WriteOutcome::Failed);
                Err(err.into())
            }
        }
    }
}
