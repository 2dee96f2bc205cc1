//! Keyed-record reconciliation
//!
//! Computes minimal batched mutations from a desired set of records
//! against the persisted set, matching on a natural key. Creates and
//! updates are inferred from the diff; deletes never are — records
//! present server-side but absent from the desired set are left alone,
//! and wholesale removal is only ever the explicit
//! [`MappingDeleteRequest`]. Reconciliation is additive and corrective
//! only.

use crate::domain::value_objects::{EventId, MappingId, SeatingPlanId, ShowId, TicketTypeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use thiserror::Error;

/// A record as the backend holds it, indexable by its natural key
pub trait PersistedRecord {
    type Key: Eq + Hash + Clone + Display;

    fn natural_key(&self) -> Self::Key;
}

/// A record as the organizer wants it persisted
pub trait DesiredRecord {
    type Key: Eq + Hash + Clone + Display;
    type Persisted: PersistedRecord<Key = Self::Key>;
    /// Payload for a create call; carries no id
    type Create;

    fn natural_key(&self) -> Self::Key;

    /// The create payload when every required field is set, `None` while
    /// the record is still incomplete. Incomplete records fail the whole
    /// batch rather than reaching the backend.
    fn as_complete(&self) -> Option<Self::Create>;

    /// True when the persisted record already carries this record's state
    fn matches(&self, persisted: &Self::Persisted) -> bool;

    /// Payload for an update call, carrying the persisted record's id
    fn to_update(&self, persisted: &Self::Persisted) -> Self::Persisted;
}

/// Batched mutations produced by [`reconcile`]
///
/// `to_delete` makes the contract explicit: it is always empty, because
/// deletion is never inferred from a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileBatch<C, U> {
    pub to_create: Vec<C>,
    pub to_update: Vec<U>,
    pub to_delete: Vec<U>,
}

impl<C, U> ReconcileBatch<C, U> {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

impl<C, U> Default for ReconcileBatch<C, U> {
    fn default() -> Self {
        Self {
            to_create: Vec::new(),
            to_update: Vec::new(),
            to_delete: Vec::new(),
        }
    }
}

/// Reconciliation guard failures; either one fails the whole batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// A desired record is missing a required field
    #[error("'{key}' is missing a required assignment")]
    IncompleteAssignment { key: String },

    /// Two desired records share a natural key
    #[error("duplicate entry for '{key}'")]
    DuplicateKey { key: String },
}

/// Diff `desired` against `persisted` by natural key.
///
/// Records with no persisted counterpart land in `to_create`; records
/// whose state differs from their counterpart land in `to_update`;
/// persisted records absent from `desired` are deliberately not touched.
pub fn reconcile<D>(
    desired: &[D],
    persisted: &[D::Persisted],
) -> Result<ReconcileBatch<D::Create, D::Persisted>, ReconcileError>
where
    D: DesiredRecord,
{
    let by_key: HashMap<D::Key, &D::Persisted> = persisted
        .iter()
        .map(|record| (record.natural_key(), record))
        .collect();

    let mut seen: HashSet<D::Key> = HashSet::with_capacity(desired.len());
    let mut batch = ReconcileBatch::default();
    for record in desired {
        let key = record.natural_key();
        if !seen.insert(key.clone()) {
            return Err(ReconcileError::DuplicateKey {
                key: key.to_string(),
            });
        }
        let Some(create) = record.as_complete() else {
            return Err(ReconcileError::IncompleteAssignment {
                key: key.to_string(),
            });
        };
        match by_key.get(&key) {
            None => batch.to_create.push(create),
            Some(existing) if !record.matches(existing) => {
                batch.to_update.push(record.to_update(existing));
            }
            Some(_) => {}
        }
    }
    Ok(batch)
}

/// Desired category→ticket-type binding as edited in the mapping screen
///
/// `ticket_type_id` stays `None` until the organizer picks a ticket type
/// for the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub seating_plan_id: SeatingPlanId,
    pub show_id: ShowId,
    pub category: String,
    pub ticket_type_id: Option<TicketTypeId>,
}

/// Seat-category mapping as the backend holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCategoryMapping {
    pub id: MappingId,
    pub seating_plan_id: SeatingPlanId,
    pub show_id: ShowId,
    pub category: String,
    pub ticket_type_id: TicketTypeId,
}

/// Create payload: a mapping the backend has not issued an id for yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSeatCategoryMapping {
    pub seating_plan_id: SeatingPlanId,
    pub show_id: ShowId,
    pub category: String,
    pub ticket_type_id: TicketTypeId,
}

impl PersistedRecord for SeatCategoryMapping {
    type Key = String;

    fn natural_key(&self) -> String {
        self.category.clone()
    }
}

impl DesiredRecord for CategoryAssignment {
    type Key = String;
    type Persisted = SeatCategoryMapping;
    type Create = NewSeatCategoryMapping;

    fn natural_key(&self) -> String {
        self.category.clone()
    }

    fn as_complete(&self) -> Option<NewSeatCategoryMapping> {
        // the mapping screen models "not picked yet" as both None and ""
        let ticket_type_id = self
            .ticket_type_id
            .clone()
            .filter(|id| !id.as_str().is_empty())?;
        Some(NewSeatCategoryMapping {
            seating_plan_id: self.seating_plan_id.clone(),
            show_id: self.show_id.clone(),
            category: self.category.clone(),
            ticket_type_id,
        })
    }

    // `ticket_type_id` is the only mutable field of a mapping
    fn matches(&self, persisted: &SeatCategoryMapping) -> bool {
        self.ticket_type_id.as_ref() == Some(&persisted.ticket_type_id)
    }

    fn to_update(&self, persisted: &SeatCategoryMapping) -> SeatCategoryMapping {
        SeatCategoryMapping {
            id: persisted.id.clone(),
            seating_plan_id: self.seating_plan_id.clone(),
            show_id: self.show_id.clone(),
            category: self.category.clone(),
            ticket_type_id: self
                .ticket_type_id
                .clone()
                .unwrap_or_else(|| persisted.ticket_type_id.clone()),
        }
    }
}

/// Explicit wholesale removal of every mapping of one show
///
/// Never produced by [`reconcile`]; only a deliberate user action builds
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDeleteRequest {
    pub event_id: EventId,
    pub show_id: ShowId,
}

impl MappingDeleteRequest {
    pub fn all_for_show(event_id: EventId, show_id: ShowId) -> Self {
        Self { event_id, show_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(category: &str, ticket: Option<&str>) -> CategoryAssignment {
        CategoryAssignment {
            seating_plan_id: SeatingPlanId::from("plan-1"),
            show_id: ShowId::from("s1"),
            category: category.to_owned(),
            ticket_type_id: ticket.map(TicketTypeId::from),
        }
    }

    fn persisted(id: &str, category: &str, ticket: &str) -> SeatCategoryMapping {
        SeatCategoryMapping {
            id: MappingId::from(id),
            seating_plan_id: SeatingPlanId::from("plan-1"),
            show_id: ShowId::from("s1"),
            category: category.to_owned(),
            ticket_type_id: TicketTypeId::from(ticket),
        }
    }

    #[test]
    fn test_unknown_category_is_created() {
        let desired = [assignment("VIP", Some("t1"))];

        let batch = reconcile(&desired, &[]).unwrap();

        assert_eq!(batch.to_create.len(), 1);
        assert_eq!(batch.to_create[0].category, "VIP");
        assert_eq!(batch.to_create[0].ticket_type_id, TicketTypeId::from("t1"));
        assert!(batch.to_update.is_empty());
        assert!(batch.to_delete.is_empty());
    }

    #[test]
    fn test_changed_assignment_is_updated_with_persisted_id() {
        let desired = [assignment("VIP", Some("t2"))];
        let existing = [persisted("m1", "VIP", "t1")];

        let batch = reconcile(&desired, &existing).unwrap();

        assert!(batch.to_create.is_empty());
        assert_eq!(batch.to_update, vec![persisted("m1", "VIP", "t2")]);
        assert!(batch.to_delete.is_empty());
    }

    #[test]
    fn test_matching_records_produce_no_work() {
        let desired = [assignment("VIP", Some("t1"))];
        let existing = [persisted("m1", "VIP", "t1")];

        assert!(reconcile(&desired, &existing).unwrap().is_empty());
    }

    #[test]
    fn test_deletes_are_never_inferred() {
        // persisted categories missing from the desired set stay put
        let desired = [assignment("VIP", Some("t1"))];
        let existing = [
            persisted("m1", "VIP", "t1"),
            persisted("m2", "Balcony", "t2"),
            persisted("m3", "Standing", "t3"),
        ];

        let batch = reconcile(&desired, &existing).unwrap();

        assert!(batch.is_empty());
    }

    #[test]
    fn test_incomplete_assignment_fails_the_batch() {
        let desired = [
            assignment("VIP", Some("t1")),
            assignment("Balcony", None),
        ];

        assert_eq!(
            reconcile(&desired, &[]),
            Err(ReconcileError::IncompleteAssignment {
                key: "Balcony".to_owned()
            })
        );
    }

    #[test]
    fn test_empty_ticket_id_counts_as_incomplete() {
        let desired = [assignment("VIP", Some(""))];

        assert_eq!(
            reconcile(&desired, &[]),
            Err(ReconcileError::IncompleteAssignment {
                key: "VIP".to_owned()
            })
        );
    }

    #[test]
    fn test_duplicate_categories_fail_the_batch() {
        let desired = [
            assignment("VIP", Some("t1")),
            assignment("VIP", Some("t2")),
        ];

        assert_eq!(
            reconcile(&desired, &[]),
            Err(ReconcileError::DuplicateKey {
                key: "VIP".to_owned()
            })
        );
    }
}
