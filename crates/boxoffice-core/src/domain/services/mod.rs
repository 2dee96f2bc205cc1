//! Domain services
//!
//! Pure functions and state machines over caller-owned snapshots; none of
//! them perform I/O or hold state across calls.

pub mod inventory_rules;
pub mod reconciler;
pub mod resequencer;
pub mod scope_resolver;

pub use inventory_rules::{validate_ticket_type, InventoryError};
pub use reconciler::{
    reconcile, CategoryAssignment, DesiredRecord, MappingDeleteRequest, NewSeatCategoryMapping,
    PersistedRecord, ReconcileBatch, ReconcileError, SeatCategoryMapping,
};
pub use resequencer::{resequence, GestureError, OrderUpdate, ReorderGesture};
pub use scope_resolver::{ScopeEntry, ScopeError, TicketSelection, VoucherScope};
