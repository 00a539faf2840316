pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("ticket not found")]
    TicketNotFound,

    #[error("error while performing database operation: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("error while decoding ticket document: {0}")]
    DecodeError(#[from] bson::de::Error),

    #[error("error while encoding ticket document: {0}")]
    EncodeError(#[from] bson::ser::Error),

    #[error("invalid object id: {0}")]
    InvalidId(#[from] bson::oid::Error),

    #[error("store did not return an object id for the inserted ticket")]
    InvalidInsertedId,

    #[error("invalid search pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("unsupported document operation: {0}")]
    Unsupported(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TicketNotFound)
    }
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}
