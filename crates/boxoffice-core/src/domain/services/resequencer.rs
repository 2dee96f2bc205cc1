//! Positional resequencing for drag-reordered collections
//!
//! The backend contract is "replace the whole order": every completed
//! reorder emits a dense 1-based assignment for the full sequence, not a
//! delta.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One position assignment sent to the order-replace endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate<I> {
    pub id: I,
    pub order: u32,
}

/// Assign dense 1-based order values following `desired`'s sequence.
///
/// Pure and order-stable: the same input yields identical output, so a
/// failed persist can be retried by re-emitting the same updates.
pub fn resequence<I: Clone>(desired: &[I]) -> Vec<OrderUpdate<I>> {
    desired
        .iter()
        .enumerate()
        .map(|(index, id)| OrderUpdate {
            id: id.clone(),
            order: index as u32 + 1,
        })
        .collect()
}

/// Invalid reorder gesture transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("cannot {attempted} while {state}")]
    InvalidTransition {
        state: &'static str,
        attempted: &'static str,
    },
}

/// Lifecycle of a single reorder gesture
///
/// `Idle → Dragging → Resequencing → PersistPending → Idle`, or straight
/// back to `Idle` when the drop lands outside the list, in which case
/// nothing is mutated. The gesture knows nothing about pointer events; it
/// only produces the next index mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderGesture<I> {
    Idle,
    Dragging,
    Resequencing { updates: Vec<OrderUpdate<I>> },
    PersistPending { updates: Vec<OrderUpdate<I>> },
}

impl<I: Clone> ReorderGesture<I> {
    pub fn new() -> Self {
        Self::Idle
    }

    fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Resequencing { .. } => "resequencing",
            Self::PersistPending { .. } => "awaiting persistence",
        }
    }

    fn invalid(&self, attempted: &'static str) -> GestureError {
        GestureError::InvalidTransition {
            state: self.state_name(),
            attempted,
        }
    }

    /// The pointer picked an item up
    pub fn begin_drag(&mut self) -> Result<(), GestureError> {
        match self {
            Self::Idle => {
                *self = Self::Dragging;
                Ok(())
            }
            _ => Err(self.invalid("begin a drag")),
        }
    }

    /// The item was dropped inside the list; compute the next mapping
    pub fn drop_inside(&mut self, desired: &[I]) -> Result<(), GestureError> {
        match self {
            Self::Dragging => {
                *self = Self::Resequencing {
                    updates: resequence(desired),
                };
                Ok(())
            }
            _ => Err(self.invalid("drop")),
        }
    }

    /// The item was dropped outside the list; the gesture ends unchanged
    pub fn drop_outside(&mut self) -> Result<(), GestureError> {
        match self {
            Self::Dragging => {
                *self = Self::Idle;
                Ok(())
            }
            _ => Err(self.invalid("drop")),
        }
    }

    /// The persistence call was dispatched
    pub fn persist_started(&mut self) -> Result<(), GestureError> {
        match self {
            Self::Resequencing { updates } => {
                *self = Self::PersistPending {
                    updates: std::mem::take(updates),
                };
                Ok(())
            }
            _ => Err(self.invalid("start persisting")),
        }
    }

    /// The persistence call finished, successfully or not
    pub fn persist_completed(&mut self) -> Result<(), GestureError> {
        match self {
            Self::PersistPending { .. } => {
                *self = Self::Idle;
                Ok(())
            }
            _ => Err(self.invalid("complete persisting")),
        }
    }

    /// The computed mapping, once a drop landed inside the list
    pub fn updates(&self) -> Option<&[OrderUpdate<I>]> {
        match self {
            Self::Resequencing { updates } | Self::PersistPending { updates } => Some(updates),
            _ => None,
        }
    }
}

impl<I: Clone> Default for ReorderGesture<I> {
    fn default() -> Self {
        Self::new()
    }
}
