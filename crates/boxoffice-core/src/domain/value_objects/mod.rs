//! Value objects shared across the domain

pub mod identifiers;
pub mod snapshot_version;
pub mod time_window;

pub use identifiers::{EventId, MappingId, QuestionId, SeatingPlanId, ShowId, TicketTypeId};
pub use snapshot_version::SnapshotVersion;
pub use time_window::{find_overlapping_pairs, NestingError, TimeWindow, WindowError};
