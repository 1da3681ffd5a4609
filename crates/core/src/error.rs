//! Error types for carhire core

use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that may carry a message written by the backend for the user.
///
/// List screens show this message in their banner and fall back to a
/// per-operation string when it is absent.
pub trait ServerMessage {
    fn server_message(&self) -> Option<&str>;
}

impl ServerMessage for Error {
    fn server_message(&self) -> Option<&str> {
        None
    }
}

impl ServerMessage for String {
    fn server_message(&self) -> Option<&str> {
        Some(self.as_str())
    }
}
