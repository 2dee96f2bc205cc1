//! Seat-category mapping synchronization flow
//!
//! Reconciles the desired category→ticket-type assignments of one show
//! against the persisted mappings and sends the minimal batched create
//! and update calls. Deletion is never part of a sync; it is the separate
//! explicit [`MappingService::clear`].

use crate::application::write_gate::{WriteGate, WriteOutcome, WriteTarget};
use crate::application::ApplicationResult;
use crate::domain::ports::{SeatMappingStore, StoreError};
use crate::domain::services::reconciler::{
    reconcile, CategoryAssignment, MappingDeleteRequest, NewSeatCategoryMapping, ReconcileBatch,
    SeatCategoryMapping,
};
use crate::domain::value_objects::{EventId, ShowId, SnapshotVersion};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Result of a mapping synchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Desired and persisted state already agreed; nothing was sent
    Unchanged,
    /// Batches were written
    Synced {
        created: Vec<SeatCategoryMapping>,
        updated: Vec<SeatCategoryMapping>,
        version: SnapshotVersion,
    },
}

/// Drives the mapping screen's save and delete actions
pub struct MappingService<S> {
    store: S,
    gate: Mutex<WriteGate>,
}

impl<S: SeatMappingStore> MappingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: Mutex::new(WriteGate::new()),
        }
    }

    /// Snapshot version the next sync for this show should be computed
    /// against
    pub fn snapshot_version(&self, event: &EventId, show: &ShowId) -> SnapshotVersion {
        self.gate
            .lock()
            .current_version(&WriteTarget::show(event.clone(), show.clone()))
    }

    /// Reconcile and persist the desired assignments for one show.
    ///
    /// Incomplete assignments fail the whole batch before anything is
    /// sent; persisted mappings missing from `desired` are left alone.
    pub async fn sync(
        &self,
        event: &EventId,
        show: &ShowId,
        desired: &[CategoryAssignment],
        computed_against: SnapshotVersion,
    ) -> ApplicationResult<SyncOutcome> {
        let persisted = self.store.load_for_show(event, show).await?;
        let batch = reconcile(desired, &persisted)?;
        if batch.is_empty() {
            debug!(%event, %show, "mappings already in sync");
            return Ok(SyncOutcome::Unchanged);
        }

        let target = WriteTarget::show(event.clone(), show.clone());
        let ticket = self.gate.lock().begin(target, computed_against)?;
        info!(
            %event, %show,
            creates = batch.to_create.len(),
            updates = batch.to_update.len(),
            "writing mapping batches"
        );
        match self.write_batches(event, show, batch).await {
            Ok((created, updated)) => {
                let version = self.gate.lock().complete(ticket, WriteOutcome::Applied);
                Ok(SyncOutcome::Synced {
                    created,
                    updated,
                    version,
                })
            }
            Err(err) => {
                self.gate.lock().complete(ticket, WriteOutcome::Failed);
                Err(err.into())
            }
        }
    }

    /// Explicit wholesale removal of every mapping of one show; never
    /// inferred from a diff
    pub async fn clear(&self, event: &EventId, show: &ShowId) -> ApplicationResult<SnapshotVersion> {
        let target = WriteTarget::show(event.clone(), show.clone());
        let ticket = {
            let mut gate = self.gate.lock();
            let current = gate.current_version(&target);
            gate.begin(target, current)?
        };
        info!(%event, %show, "deleting all mappings for show");
        let request = MappingDeleteRequest::all_for_show(event.clone(), show.clone());
        match self.store.delete_all_for_show(request).await {
            Ok(()) => Ok(self.gate.lock().complete(ticket, WriteOutcome::Applied)),
            Err(err) => {
                self.gate.lock().complete(ticket, WriteOutcome::Failed);
                Err(err.into())
            }
        }
    }

    async fn write_batches(
        &self,
        event: &EventId,
        show: &ShowId,
        batch: ReconcileBatch<NewSeatCategoryMapping, SeatCategoryMapping>,
    ) -> Result<(Vec<SeatCategoryMapping>, Vec<SeatCategoryMapping>), StoreError> {
        let mut created = Vec::new();
        if !batch.to_create.is_empty() {
            created = self
                .store
                .create_mappings(event, show, batch.to_create)
                .await?;
        }
        let mut updated = Vec::new();
        if !batch.to_update.is_empty() {
            updated = self
                .store
                .update_mappings(event, show, batch.to_update)
                .await?;
        }
        Ok((created, updated))
    }
}
