//! # Boxoffice Core
//!
//! Scheduling and reconciliation core for an event-ticketing admin
//! platform: validation of show/ticket-type schedules, voucher scope
//! resolution, seat-category mapping reconciliation, question order
//! resequencing, and the write gating that keeps asynchronous persists
//! coherent.
//!
//! The crate is a pure library. The surrounding client owns all network
//! I/O and implements the [`domain::ports`] traits; the domain layer is
//! synchronous, side-effect free, and never mutates its inputs.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod application;
pub mod domain;

// Domain layer exports
pub use domain::{
    find_overlapping_pairs, reconcile, resequence, validate_ticket_type, CategoryAssignment,
    DesiredRecord, EventId, GestureError, InventoryError, MappingDeleteRequest, MappingId,
    NestingError, NewSeatCategoryMapping, OrderUpdate, PersistedRecord, QuestionId,
    QuestionOrderStore, ReconcileBatch, ReconcileError, ReorderGesture, Schedule, ScheduleError,
    ScheduleStore, ScheduleWriteSet, ScopeEntry, ScopeError, SeatCategoryMapping, SeatMappingStore,
    SeatingPlanId, Show, ShowId, SnapshotVersion, StoreError, StoreResult, TicketSelection,
    TicketType, TicketTypeId, TimeWindow, VoucherScope, WindowError,
};

// Application layer exports
pub use application::{
    ApplicationError, ApplicationResult, GateError, MappingService, OrderingService, SaveOutcome,
    ScheduleService, SyncOutcome, WriteGate, WriteOutcome, WriteTarget, WriteTicket,
};
