//! Show entity

use crate::domain::entities::TicketType;
use crate::domain::value_objects::{SeatingPlanId, ShowId, TicketTypeId, TimeWindow};
use serde::{Deserialize, Serialize};

/// A single time-boxed occurrence of an event, owning its ticket types
///
/// Shows are created client-side without an id and with no tickets; the
/// backend issues the id on persist. A show is only ever removed
/// wholesale, never partially. Like [`TicketType`], shows are immutable
/// value records: edits return new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    id: Option<ShowId>,
    seating_plan_id: Option<SeatingPlanId>,
    window: TimeWindow,
    ticket_types: Vec<TicketType>,
}

impl Show {
    /// New client-side show with no ticket types yet
    pub fn draft(window: TimeWindow) -> Self {
        Self {
            id: None,
            seating_plan_id: None,
            window,
            ticket_types: Vec::new(),
        }
    }

    /// Absent until the backend has persisted the show
    pub fn id(&self) -> Option<&ShowId> {
        self.id.as_ref()
    }

    /// Seating plan attached to this show, if any
    pub fn seating_plan_id(&self) -> Option<&SeatingPlanId> {
        self.seating_plan_id.as_ref()
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Ticket types in declared order
    pub fn ticket_types(&self) -> &[TicketType] {
        &self.ticket_types
    }

    /// Look a ticket type up by id
    pub fn ticket_type(&self, id: &TicketTypeId) -> Option<&TicketType> {
        self.ticket_types.iter().find(|ticket| ticket.id() == id)
    }

    pub fn with_id(mut self, id: ShowId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_seating_plan(mut self, seating_plan_id: Option<SeatingPlanId>) -> Self {
        self.seating_plan_id = seating_plan_id;
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Append a ticket type, assigning the next position
    pub fn with_ticket_type(mut self, ticket: TicketType) -> Self {
        let position = self.ticket_types.len() as u32;
        self.ticket_types.push(ticket.with_position(position));
        self
    }

    /// Replace the ticket type sharing `ticket`'s id; a no-op when no
    /// ticket with that id exists
    pub fn with_ticket_type_replaced(mut self, ticket: TicketType) -> Self {
        if let Some(index) = self
            .ticket_types
            .iter()
            .position(|existing| existing.id() == ticket.id())
        {
            let position = self.ticket_types[index].position();
            self.ticket_types[index] = ticket.with_position(position);
        }
        self
    }

    /// Remove a ticket type by id, keeping positions dense
    pub fn with_ticket_type_removed(mut self, id: &TicketTypeId) -> Self {
        let tickets = std::mem::take(&mut self.ticket_types);
        self.ticket_types = tickets
            .into_iter()
            .filter(|ticket| ticket.id() != id)
            .enumerate()
            .map(|(index, ticket)| ticket.with_position(index as u32))
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap()
    }

    fn evening_show() -> Show {
        Show::draft(TimeWindow::unchecked(at(18), at(23)))
    }

    fn ticket(name: &str) -> TicketType {
        TicketType::draft(
            name,
            Decimal::from(30),
            TimeWindow::unchecked(at(18), at(20)),
        )
    }

    #[test]
    fn test_appended_tickets_get_sequential_positions() {
        let show = evening_show()
            .with_ticket_type(ticket("Early bird"))
            .with_ticket_type(ticket("Standard"))
            .with_ticket_type(ticket("Door"));

        let positions: Vec<u32> = show.ticket_types().iter().map(|t| t.position()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_removal_renumbers_densely() {
        let show = evening_show()
            .with_ticket_type(ticket("Early bird"))
            .with_ticket_type(ticket("Standard"))
            .with_ticket_type(ticket("Door"));
        let doomed = show.ticket_types()[1].id().clone();

        let show = show.with_ticket_type_removed(&doomed);

        assert_eq!(show.ticket_types().len(), 2);
        let positions: Vec<u32> = show.ticket_types().iter().map(|t| t.position()).collect();
        assert_eq!(positions, vec![0, 1]);
        assert!(show.ticket_type(&doomed).is_none());
    }

    #[test]
    fn test_replacement_keeps_position() {
        let show = evening_show()
            .with_ticket_type(ticket("Early bird"))
            .with_ticket_type(ticket("Standard"));
        let target = show.ticket_types()[1].clone();

        let show = show.with_ticket_type_replaced(target.with_name("Regular"));

        assert_eq!(show.ticket_types()[1].name(), "Regular");
        assert_eq!(show.ticket_types()[1].position(), 1);
    }

    #[test]
    fn test_edits_do_not_touch_the_original() {
        let original = evening_show();
        let edited = original.clone().with_ticket_type(ticket("Standard"));

        assert!(original.ticket_types().is_empty());
        assert_eq!(edited.ticket_types().len(), 1);
    }
}
