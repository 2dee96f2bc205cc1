//! Application services
//!
//! Thin orchestration of the domain against the collaborator ports. Each
//! service owns a [`WriteGate`](crate::application::write_gate::WriteGate)
//! so writes for one target never race each other.

pub mod mapping_service;
pub mod ordering_service;
pub mod schedule_service;

pub use mapping_service::{MappingService, SyncOutcome};
pub use ordering_service::OrderingService;
pub use schedule_service::{SaveOutcome, ScheduleService};
