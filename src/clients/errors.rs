//! Call error types for the Emarsys API client.
//!
//! Every failed call surfaces as one [`HttpError`] variant:
//!
//! - [`HttpError::Network`]: the request never produced a response
//! - [`HttpError::Response`]: the API answered with a non-2xx status
//! - [`HttpError::Decode`]: a 2xx response whose body is not JSON
//! - [`HttpError::InvalidCall`]: the call was rejected locally before sending
//!
//! No variant is retried or suppressed by the library.
//!
//! # Example
//!
//! ```rust,ignore
//! use emarsys_api::HttpError;
//!
//! match client.contacts().create(&payload, &Default::default()) {
//!     Ok(reply) => println!("Created: {}", reply["data"]["id"]),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.body),
//!     Err(HttpError::Decode(e)) => println!("Unreadable body: {}", e.body),
//!     Err(HttpError::InvalidCall(e)) => println!("Invalid call: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API answers with a non-successful status.
///
/// `reply_code` and `reply_text` are filled in when the body is an Emarsys
/// reply envelope; `body` always holds the raw response text.
///
/// # Example
///
/// ```rust
/// use emarsys_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 400,
///     reply_code: Some(2004),
///     reply_text: Some("Invalid key field id: foo".to_string()),
///     body: r#"{"replyCode":2004,"replyText":"Invalid key field id: foo","data":""}"#.to_string(),
/// };
///
/// assert!(error.to_string().contains("2004"));
/// ```
#[derive(Debug, Error)]
#[error("Emarsys API returned status {code}{}", reply_summary(.reply_code, .reply_text))]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The `replyCode` of the response body, if present.
    pub reply_code: Option<i64>,
    /// The `replyText` of the response body, if present.
    pub reply_text: Option<String>,
    /// The raw response body.
    pub body: String,
}

fn reply_summary(reply_code: &Option<i64>, reply_text: &Option<String>) -> String {
    match (reply_code, reply_text) {
        (Some(code), Some(text)) => format!(" (replyCode {code}: {text})"),
        (Some(code), None) => format!(" (replyCode {code})"),
        (None, Some(text)) => format!(" ({text})"),
        (None, None) => String::new(),
    }
}

/// Error returned when a successful response body is not valid JSON.
#[derive(Debug, Error)]
#[error("Failed to decode response body with status {code} as JSON: {source}")]
pub struct ResponseDecodeError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
    /// The underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Error returned when a call is rejected before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCallError {
    /// A payload did not serialize to a JSON object.
    #[error("Payload must be a JSON object (mapping), got {found}.")]
    PayloadNotObject {
        /// The JSON type the payload serialized to.
        found: &'static str,
    },

    /// A payload could not be serialized.
    #[error("Failed to serialize payload: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },

    /// A POST or PUT request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// No resource with the given name exists on the client.
    #[error("Unknown resource '{name}'.")]
    UnknownResource {
        /// The name that was looked up.
        name: String,
    },
}

/// Unified error type for Emarsys API calls.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx HTTP response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A 2xx response whose body is not JSON.
    #[error(transparent)]
    Decode(#[from] ResponseDecodeError),

    /// The call was rejected locally.
    #[error(transparent)]
    InvalidCall(#[from] InvalidCallError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Decode(e) => Some(e.code),
            Self::InvalidCall(_) | Self::Network(_) => None,
        }
    }
}
