//! Per-ticket-type inventory validation
//!
//! One pass reports every violation it finds so the organizer sees all of
//! them together; nothing short-circuits on the first error. That
//! accumulate-all behavior is part of the contract, not an implementation
//! detail.

use crate::domain::entities::TicketType;
use crate::domain::value_objects::{NestingError, TimeWindow, WindowError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Violations of ticket quantity, purchase-limit, price and window rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Every ticket type needs a name
    #[error("ticket type has no name")]
    MissingName,

    /// `quantity` must be at least 1
    #[error("quantity {quantity} is below the minimum of 1")]
    QuantityTooLow { quantity: u32 },

    /// `min_ticket_purchase` must be at least 1
    #[error("minimum purchase {min} is below 1")]
    MinPurchaseTooLow { min: u32 },

    /// `max_ticket_purchase` must be at least 1
    #[error("maximum purchase {max} is below 1")]
    MaxPurchaseTooLow { max: u32 },

    /// `min_ticket_purchase` must not exceed `max_ticket_purchase`
    #[error("minimum purchase {min} exceeds maximum purchase {max}")]
    PurchaseLimitsInverted { min: u32, max: u32 },

    /// `min_ticket_purchase` must not exceed the available quantity
    #[error("minimum purchase {min} exceeds available quantity {quantity}")]
    MinPurchaseExceedsQuantity { min: u32, quantity: u32 },

    /// Paid tickets cannot have a negative price
    #[error("price {price} is negative")]
    NegativePrice { price: Decimal },

    /// The ticket's own sale window is inverted
    #[error("sale window invalid: {0}")]
    InvertedWindow(#[from] WindowError),

    /// The sale window leaves the owning show's bounds
    #[error("sale window outside the show: {0}")]
    OutsideShowWindow(#[from] NestingError),
}

/// Validate one ticket type against its owning show's window, returning
/// every violation found.
///
/// An inverted sale window is reported once; the nesting check is skipped
/// for it since containment is meaningless for an inverted interval.
pub fn validate_ticket_type(ticket: &TicketType, show_window: &TimeWindow) -> Vec<InventoryError> {
    let mut errors = Vec::new();

    if ticket.name().trim().is_empty() {
        errors.push(InventoryError::MissingName);
    }

    let quantity = ticket.quantity();
    if quantity < 1 {
        errors.push(InventoryError::QuantityTooLow { quantity });
    }

    let min = ticket.min_ticket_purchase();
    let max = ticket.max_ticket_purchase();
    if min < 1 {
        errors.push(InventoryError::MinPurchaseTooLow { min });
    }
    if max < 1 {
        errors.push(InventoryError::MaxPurchaseTooLow { max });
    }
    if min > max {
        errors.push(InventoryError::PurchaseLimitsInverted { min, max });
    }
    if min > quantity {
        errors.push(InventoryError::MinPurchaseExceedsQuantity { min, quantity });
    }

    if !ticket.is_free() && ticket.price() < Decimal::ZERO {
        errors.push(InventoryError::NegativePrice {
            price: ticket.price(),
        });
    }

    match ticket.window().validate() {
        Err(inverted) => errors.push(InventoryError::InvertedWindow(inverted)),
        Ok(()) => {
            if let Err(out_of_bounds) = ticket.window().check_nested_in(show_window) {
                errors.push(InventoryError::OutsideShowWindow(out_of_bounds));
            }
        }
    }

    errors
}
