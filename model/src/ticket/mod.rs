mod new_ticket;
pub use new_ticket::NewTicket;

mod ticket;
pub use ticket::Ticket;
