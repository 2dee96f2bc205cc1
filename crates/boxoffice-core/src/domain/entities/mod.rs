//! Domain entities

pub mod show;
pub mod ticket_type;

pub use show::Show;
pub use ticket_type::TicketType;
