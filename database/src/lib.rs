mod error;
pub use error::{Error, Result};

mod collection;
pub use collection::DocumentCollection;

mod mongo;
pub use mongo::MongoCollection;

mod memory;
pub use memory::MemoryCollection;

pub mod mapper;

pub mod patch;

mod tickets;
pub use tickets::{search_filter, TicketStore};

// re-export for callers building documents
pub use bson;
