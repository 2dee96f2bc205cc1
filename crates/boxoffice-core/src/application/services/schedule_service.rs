//! Schedule persistence flow
//!
//! Validates the desired schedule, diffs it against what the backend
//! holds, and only sends the full-replace write when something materially
//! changed.

use crate::application::write_gate::{WriteGate, WriteOutcome, WriteTarget};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::aggregates::{Schedule, ScheduleWriteSet};
use crate::domain::entities::Show;
use crate::domain::ports::ScheduleStore;
use crate::domain::value_objects::{EventId, SnapshotVersion};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Result of a save request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted state already matched; no write was sent
    Unchanged,
    /// The schedule was replaced; `shows` is the persisted result with
    /// server ids filled in
    Replaced {
        version: SnapshotVersion,
        shows: Vec<Show>,
    },
}

/// Drives schedule edits from the UI to the schedule store
pub struct ScheduleService<S> {
    store: S,
    gate: Mutex<WriteGate>,
}

impl<S: ScheduleStore> ScheduleService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: Mutex::new(WriteGate::new()),
        }
    }

    /// Snapshot version the next save for `event` should be computed
    /// against
    pub fn snapshot_version(&self, event: &EventId) -> SnapshotVersion {
        self.gate
            .lock()
            .current_version(&WriteTarget::event(event.clone()))
    }

    /// Validate and persist the desired schedule.
    ///
    /// `computed_against` names the snapshot the desired state was edited
    /// on top of; a superseded version is rejected so the caller reloads
    /// and recomputes instead of clobbering a newer write. Validation
    /// failures return every violation at once.
    pub async fn save(
        &self,
        event: &EventId,
        desired: &Schedule,
        computed_against: SnapshotVersion,
    ) -> ApplicationResult<SaveOutcome> {
        desired.validate().map_err(ApplicationError::Validation)?;

        let persisted = Schedule::new(self.store.load_schedule(event).await?);
        match desired.diff_against_persisted(&persisted) {
            ScheduleWriteSet::Unchanged => {
                debug!(%event, "schedule unchanged, skipping write");
                Ok(SaveOutcome::Unchanged)
            }
            ScheduleWriteSet::Replace(shows) => {
                let target = WriteTarget::event(event.clone());
                let ticket = self.gate.lock().begin(target, computed_against)?;
                info!(%event, shows = shows.len(), "replacing schedule");
                match self.store.replace_schedule(event, shows).await {
                    Ok(saved) => {
                        let version = self.gate.lock().complete(ticket, WriteOutcome::Applied);
                        Ok(SaveOutcome::Replaced {
                            version,
                            shows: saved,
                        })
                    }
                    Err(err) => {
                        self.gate.lock().complete(ticket, WriteOutcome::Failed);
                        Err(err.into())
                    }
                }
            }
        }
    }
}
