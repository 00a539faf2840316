pub mod http;

mod config;
pub use config::{Config, StoreBackend};

mod error;
pub use error::{Error, Result};

mod util;
pub use util::shutdown_signal;
