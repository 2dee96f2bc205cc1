//! Voucher scope resolution
//!
//! A voucher's scope names the shows and ticket types a discount applies
//! to. Resolution is lazy: the scope is expanded against the schedule
//! snapshot handed in at call time and must be re-run after any schedule
//! change, never cached across mutations.

use crate::domain::aggregates::Schedule;
use crate::domain::entities::Show;
use crate::domain::value_objects::{ShowId, TicketTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Which ticket types of one show a voucher covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketSelection {
    /// Every ticket type the show has at resolution time
    All,
    /// An explicit id list, intersected with the show's current tickets
    Explicit(Vec<TicketTypeId>),
}

/// One show a non-global voucher applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub show_id: ShowId,
    pub tickets: TicketSelection,
}

impl ScopeEntry {
    /// Entry covering all ticket types of `show_id`
    pub fn all_tickets(show_id: ShowId) -> Self {
        Self {
            show_id,
            tickets: TicketSelection::All,
        }
    }

    /// Entry covering an explicit selection of ticket types
    pub fn tickets(show_id: ShowId, ticket_type_ids: Vec<TicketTypeId>) -> Self {
        Self {
            show_id,
            tickets: TicketSelection::Explicit(ticket_type_ids),
        }
    }
}

/// Scope validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A voucher limited to specific shows must select at least one
    #[error("a voucher limited to specific shows must select at least one show")]
    EmptySelection,
}

/// The subset of shows and ticket types a voucher discount applies to
///
/// Recomputed wholesale on every edit, never merged with a previous
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherScope {
    /// Applies to every show and every ticket type of the event
    AllShowings,
    /// Applies only to the listed shows
    Selected(Vec<ScopeEntry>),
}

impl VoucherScope {
    /// Reject scopes that cannot apply to anything by construction
    pub fn validate(&self) -> Result<(), ScopeError> {
        match self {
            Self::AllShowings => Ok(()),
            Self::Selected(entries) if entries.is_empty() => Err(ScopeError::EmptySelection),
            Self::Selected(_) => Ok(()),
        }
    }

    /// Resolve the scope to concrete `(show, ticket type)` pairs against
    /// the given schedule snapshot.
    ///
    /// Entries naming shows that no longer exist, and explicit ids of
    /// since-deleted ticket types, are dropped silently: a voucher never
    /// hard-fails merely because unrelated inventory changed. Shows the
    /// backend has not issued an id for cannot be referenced and do not
    /// resolve.
    pub fn resolve(&self, schedule: &Schedule) -> BTreeSet<(ShowId, TicketTypeId)> {
        let mut resolved = BTreeSet::new();
        match self {
            Self::AllShowings => {
                for show in schedule.shows() {
                    insert_all_tickets(&mut resolved, show);
                }
            }
            Self::Selected(entries) => {
                for entry in entries {
                    let Some(show) = schedule
                        .shows()
                        .iter()
                        .find(|show| show.id() == Some(&entry.show_id))
                    else {
                        continue;
                    };
                    match &entry.tickets {
                        TicketSelection::All => insert_all_tickets(&mut resolved, show),
                        TicketSelection::Explicit(ids) => {
                            for id in ids {
                                if show.ticket_type(id).is_some() {
                                    resolved.insert((entry.show_id.clone(), id.clone()));
                                }
                            }
                        }
                    }
                }
            }
        }
        resolved
    }

    /// Checkout-time membership test: does the voucher apply to this
    /// ticket type of this show? Pure function of the current schedule;
    /// never fails.
    pub fn applies_to(
        &self,
        schedule: &Schedule,
        show_id: &ShowId,
        ticket_type_id: &TicketTypeId,
    ) -> bool {
        self.resolve(schedule)
            .contains(&(show_id.clone(), ticket_type_id.clone()))
    }
}

fn insert_all_tickets(resolved: &mut BTreeSet<(ShowId, TicketTypeId)>, show: &Show) {
    let Some(show_id) = show.id() else {
        return;
    };
    for ticket in show.ticket_types() {
        resolved.insert((show_id.clone(), ticket.id().clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TicketType;
    use crate::domain::value_objects::TimeWindow;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap()
    }

    fn ticket(id: &str) -> TicketType {
        TicketType::draft(
            "Standard",
            Decimal::from(20),
            TimeWindow::unchecked(at(10), at(12)),
        )
        .with_id(TicketTypeId::from(id))
    }

    fn show(id: &str, tickets: &[&str]) -> Show {
        let mut show =
            Show::draft(TimeWindow::unchecked(at(10), at(12))).with_id(ShowId::from(id));
        for ticket_id in tickets {
            show = show.with_ticket_type(ticket(ticket_id));
        }
        show
    }

    fn schedule() -> Schedule {
        Schedule::new(vec![
            show("s1", &["t1", "t2"]),
            show("s2", &["t3"]),
        ])
    }

    #[test]
    fn test_all_showings_is_the_full_cross_product() {
        let resolved = VoucherScope::AllShowings.resolve(&schedule());
        assert_eq!(resolved.len(), 3);
        assert!(resolved.contains(&(ShowId::from("s2"), TicketTypeId::from("t3"))));
    }

    #[test]
    fn test_resolution_tracks_schedule_changes() {
        let scope = VoucherScope::AllShowings;
        let before = scope.resolve(&schedule());

        let grown = schedule().with_show(show("s3", &["t4", "t5"]));
        let after = scope.resolve(&grown);

        assert_eq!(before.len(), 3);
        assert_eq!(after.len(), 5);
    }

    #[test]
    fn test_explicit_selection_is_intersected() {
        let scope = VoucherScope::Selected(vec![ScopeEntry::tickets(
            ShowId::from("s1"),
            vec![TicketTypeId::from("t2"), TicketTypeId::from("gone")],
        )]);

        let resolved = scope.resolve(&schedule());

        // the stale id is dropped silently
        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains(&(ShowId::from("s1"), TicketTypeId::from("t2"))));
    }

    #[test]
    fn test_all_ticket_types_expands_at_resolution_time() {
        let scope = VoucherScope::Selected(vec![ScopeEntry::all_tickets(ShowId::from("s1"))]);
        let resolved = scope.resolve(&schedule());
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_deleted_show_resolves_to_nothing() {
        let scope = VoucherScope::Selected(vec![ScopeEntry::all_tickets(ShowId::from("gone"))]);
        assert!(scope.resolve(&schedule()).is_empty());
    }

    #[test]
    fn test_unpersisted_shows_are_skipped() {
        let with_draft = schedule().with_show(
            Show::draft(TimeWindow::unchecked(at(13), at(14))).with_ticket_type(ticket("t9")),
        );
        let resolved = VoucherScope::AllShowings.resolve(&with_draft);
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn test_applies_to_membership() {
        let scope = VoucherScope::Selected(vec![ScopeEntry::tickets(
            ShowId::from("s2"),
            vec![TicketTypeId::from("t3")],
        )]);
        let schedule = schedule();

        assert!(scope.applies_to(&schedule, &ShowId::from("s2"), &TicketTypeId::from("t3")));
        assert!(!scope.applies_to(&schedule, &ShowId::from("s1"), &TicketTypeId::from("t1")));
    }

    #[test]
    fn test_empty_selection_is_invalid() {
        assert_eq!(
            VoucherScope::Selected(Vec::new()).validate(),
            Err(ScopeError::EmptySelection)
        );
        assert!(VoucherScope::AllShowings.validate().is_ok());
    }
}
