//! Error types for Budget Bridge

use thiserror::Error;

/// Result type alias using Budget Bridge's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Budget Bridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The event or its embedded budget notification could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The webhook answered with a status other than 200
    #[error("Status Code: {status}, Response: {body}")]
    Delivery {
        /// HTTP status code returned by the webhook
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The webhook could not be reached
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The webhook URL is not a usable URL
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a delivery error from a rejected webhook response
    pub fn delivery(status: u16, body: impl Into<String>) -> Self {
        Self::Delivery {
            status,
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status carried by a delivery error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivery { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
