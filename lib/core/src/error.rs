use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Location not found: {0}")]
    RecordNotFound(String),

    #[error("Duplicate location identifier: {0}")]
    DuplicateRecord(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
