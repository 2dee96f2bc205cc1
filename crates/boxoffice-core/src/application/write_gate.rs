//! Single-writer gating with snapshot versioning
//!
//! Diffs are computed against a "last known persisted" snapshot that only
//! the completion of a prior write may advance. The gate enforces at most
//! one in-flight reconciliation or resequencing write per target, and
//! rejects diffs computed against a superseded snapshot so a late result
//! is discarded instead of applied. Concurrent diffs against a stale
//! snapshot can silently resurrect deleted mappings or misorder
//! questions; this is a correctness requirement, not a performance one.

use crate::domain::value_objects::{EventId, ShowId, SnapshotVersion};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// What a write is scoped to: a whole event, or one show within it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WriteTarget {
    event_id: EventId,
    show_id: Option<ShowId>,
}

impl WriteTarget {
    /// Target covering event-wide writes (schedule replace, question order)
    pub fn event(event_id: EventId) -> Self {
        Self {
            event_id,
            show_id: None,
        }
    }

    /// Target covering writes scoped to one show (mapping batches)
    pub fn show(event_id: EventId, show_id: ShowId) -> Self {
        Self {
            event_id,
            show_id: Some(show_id),
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn show_id(&self) -> Option<&ShowId> {
        self.show_id.as_ref()
    }
}

impl fmt::Display for WriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.show_id {
            Some(show_id) => write!(f, "event {}, show {}", self.event_id, show_id),
            None => write!(f, "event {}", self.event_id),
        }
    }
}

/// Gating failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A prior write for the target has not completed yet; the new diff
    /// must wait for it
    #[error("a write for {target} is already in flight")]
    WriteInFlight { target: WriteTarget },

    /// The diff was computed against a superseded snapshot; recompute it,
    /// never apply it
    #[error("stale snapshot for {target}: computed against {computed_against}, current is {current}")]
    StaleSnapshot {
        target: WriteTarget,
        computed_against: SnapshotVersion,
        current: SnapshotVersion,
    },
}

/// Ticket for one open write slot; hand it back to [`WriteGate::complete`]
/// when the write finishes, successfully or not
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an unreturned ticket keeps its target's write slot open"]
pub struct WriteTicket {
    target: WriteTarget,
}

impl WriteTicket {
    pub fn target(&self) -> &WriteTarget {
        &self.target
    }
}

/// Outcome reported back for a completed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied; the persisted snapshot advanced
    Applied,
    /// The write failed; the snapshot is unchanged and may be retried
    Failed,
}

/// Tracks per-target snapshot versions and in-flight writes
///
/// Pure synchronous state: the gate performs no I/O and knows nothing
/// about time. Callers own it and drive every transition.
#[derive(Debug, Default)]
pub struct WriteGate {
    versions: HashMap<WriteTarget, SnapshotVersion>,
    in_flight: HashSet<WriteTarget>,
}

impl WriteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of the last applied write for the target; diffs should be
    /// computed against the snapshot this identifies
    pub fn current_version(&self, target: &WriteTarget) -> SnapshotVersion {
        self.versions
            .get(target)
            .copied()
            .unwrap_or(SnapshotVersion::INITIAL)
    }

    /// Open the single write slot for the target.
    ///
    /// `computed_against` is the snapshot version the caller's diff was
    /// computed on top of.
    pub fn begin(
        &mut self,
        target: WriteTarget,
        computed_against: SnapshotVersion,
    ) -> Result<WriteTicket, GateError> {
        if self.in_flight.contains(&target) {
            return Err(GateError::WriteInFlight { target });
        }
        let current = self.current_version(&target);
        if computed_against != current {
            return Err(GateError::StaleSnapshot {
                target,
                computed_against,
                current,
            });
        }
        self.in_flight.insert(target.clone());
        Ok(WriteTicket { target })
    }

    /// Close the slot; an applied outcome advances the snapshot version
    pub fn complete(&mut self, ticket: WriteTicket, outcome: WriteOutcome) -> SnapshotVersion {
        let WriteTicket { target } = ticket;
        self.in_flight.remove(&target);
        let current = self.current_version(&target);
        match outcome {
            WriteOutcome::Applied => {
                let next = current.next();
                self.versions.insert(target, next);
                next
            }
            WriteOutcome::Failed => current,
        }
    }

    /// Check a result arriving late: still valid for the current
    /// snapshot, or stale and to be discarded?
    pub fn ensure_fresh(
        &self,
        target: &WriteTarget,
        computed_against: SnapshotVersion,
    ) -> Result<(), GateError> {
        let current = self.current_version(target);
        if computed_against != current {
            return Err(GateError::StaleSnapshot {
                target: target.clone(),
                computed_against,
                current,
            });
        }
        Ok(())
    }
}
