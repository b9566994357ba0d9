//! Error types for the Subrelay core library
//!
//! This module defines the error taxonomy of the bridge, using thiserror for
//! ergonomic error definitions and anyhow for flexible source chains.

use thiserror::Error;

use crate::api::FieldError;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Mapping-configuration or environment problems
    ///
    /// Syntax failures, missing mapping slots, and missing environment
    /// variables all land here with distinguishable messages.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Trigger payload in neither supported event shape, or without usable
    /// document data
    #[error("Event error: {message}")]
    Event { message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Subscriber API failure re-surfaced from the transport
    ///
    /// The message carries the validation-error framing for 400-class
    /// responses with structured field detail.
    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        details: Option<Vec<FieldError>>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
