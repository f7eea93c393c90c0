//! Error types for the `TicketDesk` dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the `TicketDesk` dashboard
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Identifier that does not have the `TICKET-<n>` shape
    InvalidTicketId {
        /// The offending input
        input: String,
    },

    /// Store contents violate an invariant (duplicate ids and the like)
    DataIntegrity(String),

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Resource exhausted error
    ResourceExhausted {
        /// Resource that was exhausted
        resource: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::Validation`]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::InvalidTicketId { input } => write!(f, "Invalid ticket id: {input:?}"),
            Self::DataIntegrity(msg) => write!(f, "Data integrity error: {msg}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::ResourceExhausted { resource } => write!(f, "Resource exhausted: {resource}"),
        }
    }
}

impl StdError for Error {}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
