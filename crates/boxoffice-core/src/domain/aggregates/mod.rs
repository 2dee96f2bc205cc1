//! Aggregates

pub mod schedule;

pub use schedule::{Schedule, ScheduleError, ScheduleWriteSet};
