mod server;
pub use server::{Server, STORE_TIMEOUT};

mod handlers;
pub use handlers::recover;

mod response;
pub use response::{CreatedResponse, TicketList};
