mod ticket_id;
pub use ticket_id::TicketId;

pub mod ticket;
pub use ticket::{NewTicket, Ticket};
