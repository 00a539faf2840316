use std::{io, net};
use warp::reject::Reject;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("bad request: {0}")]
    BadRequest(serde_json::Error),

    #[error("error while performing database operation: {0}")]
    DatabaseError(#[from] database::Error),

    #[error("database operation timed out")]
    Timeout(#[from] tokio::time::error::Elapsed),

    #[error("database task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("error occurred during parsing address: {0}")]
    AddrParseError(#[from] net::AddrParseError),

    #[error("error while loading config: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("MONGO_URI must be set when using the mongo store backend")]
    MissingMongoUri,

    #[error("invalid sentry DSN: {0}")]
    SentryDsnError(#[from] sentry::types::ParseDsnError),

    #[error("error occurred during I/O operation: {0}")]
    IoError(#[from] io::Error),

    #[error("error occurred in warp: {0}")]
    WarpError(#[from] warp::Error),
}

impl Error {
    /// True when the underlying cause is a missing ticket, however the error
    /// was wrapped on the way up.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::DatabaseError(e) if e.is_not_found())
    }
}

impl Reject for Error {}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_survives_wrapping() {
        let err = Error::from(database::Error::TicketNotFound);
        assert!(err.is_not_found());

        let err = Error::from(database::Error::InvalidInsertedId);
        assert!(!err.is_not_found());
        assert!(!Error::MissingMongoUri.is_not_found());
    }

    #[test]
    fn test_rejection_carries_error() {
        let rejection = warp::Rejection::from(Error::from(database::Error::TicketNotFound));

        let err = rejection.find::<Error>().expect("error should be recoverable");
        assert!(err.is_not_found());
    }
}
