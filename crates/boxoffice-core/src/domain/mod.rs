//! Domain layer — pure scheduling and reconciliation logic
//!
//! No I/O, no clocks, no state shared across calls: every operation is a
//! pure mapping from caller-owned snapshots to values or accumulated
//! error lists. The core never mutates its inputs and never silently
//! repairs invalid data; it only reports what is wrong.

pub mod aggregates;
pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use aggregates::{Schedule, ScheduleError, ScheduleWriteSet};
pub use entities::{Show, TicketType};
pub use ports::{QuestionOrderStore, ScheduleStore, SeatMappingStore, StoreError, StoreResult};
pub use services::{
    reconcile, resequence, validate_ticket_type, CategoryAssignment, DesiredRecord, GestureError,
    InventoryError, MappingDeleteRequest, NewSeatCategoryMapping, OrderUpdate, PersistedRecord,
    ReconcileBatch, ReconcileError, ReorderGesture, ScopeEntry, ScopeError, SeatCategoryMapping,
    TicketSelection, VoucherScope,
};
pub use value_objects::{
    find_overlapping_pairs, EventId, MappingId, NestingError, QuestionId, SeatingPlanId, ShowId,
    SnapshotVersion, TicketTypeId, TimeWindow, WindowError,
};
