//! Application layer — orchestration of domain logic against ports
//!
//! Owns the concurrency contract around asynchronous persistence: one
//! in-flight write per target, snapshot-versioned diffs, stale results
//! discarded.

pub mod services;
pub mod write_gate;

pub use services::{MappingService, OrderingService, SaveOutcome, ScheduleService, SyncOutcome};
pub use write_gate::{GateError, WriteGate, WriteOutcome, WriteTarget, WriteTicket};

use crate::domain::aggregates::ScheduleError;
use crate::domain::ports::StoreError;
use crate::domain::services::reconciler::ReconcileError;

/// Application Result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    /// The desired schedule failed validation; every violation is listed
    #[error("schedule validation failed with {} violation(s)", .0.len())]
    Validation(Vec<ScheduleError>),

    /// Reconciliation guard failure
    #[error("reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Write gating failure
    #[error("write rejected: {0}")]
    Gate(#[from] GateError),

    /// Collaborator failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
