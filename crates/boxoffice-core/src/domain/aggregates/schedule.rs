//! Schedule aggregate
//!
//! The in-memory model of every show (and nested ticket type) of one
//! event. The aggregate is a snapshot owned by the caller; validation and
//! diffing never mutate it.

use crate::domain::entities::{Show, TicketType};
use crate::domain::services::inventory_rules::{self, InventoryError};
use crate::domain::value_objects::{find_overlapping_pairs, TimeWindow, WindowError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schedule-level validation errors, index-tagged to the offending show
/// and ticket type so callers can address field-level messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// An event needs at least one show
    #[error("a schedule needs at least one show")]
    EmptySchedule,

    /// A show's own window is invalid
    #[error("show {show}: {source}")]
    InvalidShowWindow { show: usize, source: WindowError },

    /// Every show needs at least one ticket type
    #[error("show {show} has no ticket types")]
    ShowWithoutTickets { show: usize },

    /// A ticket type violated an inventory rule; one entry per violation
    #[error("show {show}, ticket type {ticket}: {source}")]
    InvalidTicketType {
        show: usize,
        ticket: usize,
        source: InventoryError,
    },

    /// Two shows occupy overlapping time windows
    #[error("shows {first} and {second} overlap")]
    OverlappingShows { first: usize, second: usize },
}

/// Write decision produced by [`Schedule::diff_against_persisted`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleWriteSet {
    /// Persisted state already matches; no write needed
    Unchanged,
    /// Replace the event's whole schedule with these shows
    Replace(Vec<Show>),
}

/// All shows of one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    shows: Vec<Show>,
}

impl Schedule {
    pub fn new(shows: Vec<Show>) -> Self {
        Self { shows }
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn show(&self, index: usize) -> Option<&Show> {
        self.shows.get(index)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn with_show(mut self, show: Show) -> Self {
        self.shows.push(show);
        self
    }

    /// Remove a show wholesale; out-of-range indices are a no-op
    pub fn with_show_removed(mut self, index: usize) -> Self {
        if index < self.shows.len() {
            self.shows.remove(index);
        }
        self
    }

    pub fn with_show_replaced(mut self, index: usize, show: Show) -> Self {
        if index < self.shows.len() {
            self.shows[index] = show;
        }
        self
    }

    /// Validate the whole schedule before it is persisted.
    ///
    /// Every violation across every show is accumulated and returned
    /// together; a single pass never stops at the first problem. Shows
    /// whose own windows are inverted are excluded from the overlap sweep
    /// so each defect surfaces exactly once.
    pub fn validate(&self) -> Result<(), Vec<ScheduleError>> {
        let mut errors = Vec::new();

        if self.shows.is_empty() {
            errors.push(ScheduleError::EmptySchedule);
        }

        for (show_index, show) in self.shows.iter().enumerate() {
            if let Err(source) = show.window().validate() {
                errors.push(ScheduleError::InvalidShowWindow {
                    show: show_index,
                    source,
                });
            }

            if show.ticket_types().is_empty() {
                errors.push(ScheduleError::ShowWithoutTickets { show: show_index });
            }

            for (ticket_index, ticket) in show.ticket_types().iter().enumerate() {
                for source in inventory_rules::validate_ticket_type(ticket, &show.window()) {
                    errors.push(ScheduleError::InvalidTicketType {
                        show: show_index,
                        ticket: ticket_index,
                        source,
                    });
                }
            }
        }

        let well_formed: Vec<(usize, TimeWindow)> = self
            .shows
            .iter()
            .enumerate()
            .filter(|(_, show)| show.window().validate().is_ok())
            .map(|(index, show)| (index, show.window()))
            .collect();
        let windows: Vec<TimeWindow> = well_formed.iter().map(|(_, window)| *window).collect();
        for (first, second) in find_overlapping_pairs(&windows) {
            errors.push(ScheduleError::OverlappingShows {
                first: well_formed[first].0,
                second: well_formed[second].0,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Decide whether persisting `self` over `persisted` needs a write.
    ///
    /// Equality is structural over every field except server-issued ids
    /// the client does not hold yet: a desired show with no id, or a
    /// ticket type still carrying its temporary key, matches its
    /// positional counterpart on content alone. When nothing materially
    /// changed no write is emitted.
    pub fn diff_against_persisted(&self, persisted: &Schedule) -> ScheduleWriteSet {
        if schedules_match(self, persisted) {
            ScheduleWriteSet::Unchanged
        } else {
            ScheduleWriteSet::Replace(self.shows.clone())
        }
    }
}

impl FromIterator<Show> for Schedule {
    fn from_iter<I: IntoIterator<Item = Show>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn schedules_match(desired: &Schedule, persisted: &Schedule) -> bool {
    desired.shows.len() == persisted.shows.len()
        && desired
            .shows
            .iter()
            .zip(&persisted.shows)
            .all(|(d, p)| shows_match(d, p))
}

fn shows_match(desired: &Show, persisted: &Show) -> bool {
    let ids_match = match desired.id() {
        Some(id) => persisted.id() == Some(id),
        // not yet issued client-side
        None => true,
    };
    ids_match
        && desired.seating_plan_id() == persisted.seating_plan_id()
        && desired.window() == persisted.window()
        && desired.ticket_types().len() == persisted.ticket_types().len()
        && desired
            .ticket_types()
            .iter()
            .zip(persisted.ticket_types())
            .all(|(d, p)| ticket_types_match(d, p))
}

fn ticket_types_match(desired: &TicketType, persisted: &TicketType) -> bool {
    let ids_match = desired.id().is_temporary() || desired.id() == persisted.id();
    ids_match
        && desired.name() == persisted.name()
        && desired.description() == persisted.description()
        && desired.effective_price() == persisted.effective_price()
        && desired.is_free() == persisted.is_free()
        && desired.quantity() == persisted.quantity()
        && desired.min_ticket_purchase() == persisted.min_ticket_purchase()
        && desired.max_ticket_purchase() == persisted.max_ticket_purchase()
        && desired.window() == persisted.window()
        && desired.position() == persisted.position()
}
