//! Ticket type entity

use crate::domain::value_objects::{TicketTypeId, TimeWindow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A category of sellable inventory scoped to one show
///
/// Ticket types are immutable value records: every edit produces a new
/// value through the `with_*` helpers, so disjoint UI fragments editing
/// the same show never share mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    id: TicketTypeId,
    name: String,
    description: Option<String>,
    price: Decimal,
    is_free: bool,
    quantity: u32,
    min_ticket_purchase: u32,
    max_ticket_purchase: u32,
    window: TimeWindow,
    position: u32,
}

impl TicketType {
    /// Create a draft ticket type with a synthesized client-side key.
    ///
    /// Quantity and purchase limits default to 1; the owning show assigns
    /// the position when the ticket is appended.
    pub fn draft(name: impl Into<String>, price: Decimal, window: TimeWindow) -> Self {
        Self {
            id: TicketTypeId::temporary(),
            name: name.into(),
            description: None,
            price,
            is_free: false,
            quantity: 1,
            min_ticket_purchase: 1,
            max_ticket_purchase: 1,
            window,
            position: 0,
        }
    }

    pub fn id(&self) -> &TicketTypeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw price as entered by the organizer
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Price that actually applies: zero for free tickets
    pub fn effective_price(&self) -> Decimal {
        if self.is_free {
            Decimal::ZERO
        } else {
            self.price
        }
    }

    pub fn is_free(&self) -> bool {
        self.is_free
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn min_ticket_purchase(&self) -> u32 {
        self.min_ticket_purchase
    }

    pub fn max_ticket_purchase(&self) -> u32 {
        self.max_ticket_purchase
    }

    /// Sale window; must nest inside the owning show's window
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Display and sale order within the owning show
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Replace the key with the server-issued id after persistence
    pub fn with_id(mut self, id: TicketTypeId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn with_is_free(mut self, is_free: bool) -> Self {
        self.is_free = is_free;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_purchase_limits(mut self, min: u32, max: u32) -> Self {
        self.min_ticket_purchase = min;
        self.max_ticket_purchase = max;
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub(crate) fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}
