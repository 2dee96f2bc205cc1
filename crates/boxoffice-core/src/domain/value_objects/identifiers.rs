//! Opaque identifier value objects
//!
//! All identifiers are issued by the backend as opaque strings. Ticket
//! types are the one exception: the editing UI needs a key before the
//! backend has seen the record, so a temporary key is synthesized
//! client-side and replaced by the server-issued id on persist.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a backend-issued identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

opaque_id!(EventId, "Identifier of an event.");
opaque_id!(ShowId, "Identifier of a persisted show.");
opaque_id!(TicketTypeId, "Identifier of a ticket type within a show.");
opaque_id!(SeatingPlanId, "Identifier of a seating plan.");
opaque_id!(MappingId, "Identifier of a persisted seat-category mapping.");
opaque_id!(QuestionId, "Identifier of an order question.");

/// Prefix marking ticket-type keys synthesized before persistence
const TEMP_KEY_PREFIX: &str = "tmp-";

impl TicketTypeId {
    /// Synthesize a client-side key for a ticket type the backend has not
    /// seen yet. The server-issued id replaces it on save.
    pub fn temporary() -> Self {
        Self(format!("{}{}", TEMP_KEY_PREFIX, Uuid::new_v4()))
    }

    /// True for keys made by [`TicketTypeId::temporary`]; schedule diffing
    /// ignores these when comparing against persisted state.
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_KEY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_keys_are_unique() {
        let a = TicketTypeId::temporary();
        let b = TicketTypeId::temporary();

        assert_ne!(a, b);
        assert!(a.is_temporary());
        assert!(b.is_temporary());
    }

    #[test]
    fn test_server_issued_ids_are_not_temporary() {
        let id = TicketTypeId::new("661f9511");
        assert!(!id.is_temporary());
        assert_eq!(id.as_str(), "661f9511");
    }

    #[test]
    fn test_display_round_trip() {
        let id = ShowId::from("show-42");
        assert_eq!(id.to_string(), "show-42");
        assert_eq!(ShowId::from(id.to_string()), id);
    }
}
