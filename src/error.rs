//! Configuration error types for the Emarsys API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! credentials or URIs are rejected before a connection exists.
//!
//! # Example
//!
//! ```rust
//! use emarsys_api::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide your Emarsys API username.")]
    EmptyUsername,

    /// Secret cannot be empty.
    #[error("Secret cannot be empty. Please provide your Emarsys API secret.")]
    EmptySecret,

    /// Base URI is invalid.
    #[error("Invalid base URI '{uri}'. Please provide an http(s) URL (e.g., 'https://api.emarsys.net/').")]
    InvalidBaseUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to initialize the HTTP transport: {message}")]
    TransportInit {
        /// Description of the transport failure.
        message: String,
    },
}
