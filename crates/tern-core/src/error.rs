use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Generic(s.to_string())
    }
}
