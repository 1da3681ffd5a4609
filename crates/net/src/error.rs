//! Network error types

use std::io;

use carhire_core::ServerMessage;

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] carhire_core::Error),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Field errors caught before the request was sent
    pub fn field_errors(&self) -> Option<&carhire_core::FieldErrors> {
        match self {
            Error::Core(carhire_core::Error::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl ServerMessage for Error {
    fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_api_errors() {
        let err = Error::Api {
            status: 409,
            message: "Car already booked".to_string(),
        };
        assert_eq!(err.server_message(), Some("Car already booked"));
        assert!(!err.is_not_found());

        let blank = Error::Api {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(blank.server_message(), None);

        let io = Error::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(io.server_message(), None);
    }

    #[test]
    fn test_not_found() {
        let err = Error::Api {
            status: 404,
            message: String::new(),
        };
        assert!(err.is_not_found());
    }
}
