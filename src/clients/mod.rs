//! Connection types for Emarsys API communication.
//!
//! This module provides the transport layer: building requests, signing
//! them with WSSE, sending them and turning responses into JSON or errors.
//!
//! # Overview
//!
//! - [`Connection`]: the trait resources are generic over
//! - [`SyncConnection`]: blocking connection, returns results directly
//! - [`AsyncConnection`]: non-blocking connection, returns [`ApiFuture`]s
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Reply`]: a typed view of the Emarsys reply envelope
//! - [`HttpError`]: the error type of every call
//!
//! # Example
//!
//! ```rust,no_run
//! use emarsys_api::{Connection, HttpMethod, HttpRequest, SyncConnection};
//! use serde_json::json;
//!
//! let connection = SyncConnection::new("customer001", "my-secret").unwrap();
//!
//! let request = HttpRequest::builder(HttpMethod::Post, "api/v2/contact/")
//!     .body(json!({"3": "squirrel@squirrelmail.com"}))
//!     .build()
//!     .unwrap();
//!
//! let reply = connection.make_call(request).unwrap();
//! println!("Created contact {}", reply["data"]["id"]);
//! ```
//!
//! # Error Behavior
//!
//! Calls are made exactly once. Non-2xx responses are returned as
//! [`HttpError::Response`] without retrying; transport failures surface as
//! [`HttpError::Network`].

mod async_connection;
mod connection;
mod errors;
mod http_request;
mod http_response;
mod sync_connection;

pub use async_connection::{ApiFuture, AsyncConnection};
pub use connection::{Connection, SDK_VERSION};
pub use errors::{HttpError, HttpResponseError, InvalidCallError, ResponseDecodeError};
pub(crate) use http_request::json_type_name;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::Reply;
pub use sync_connection::SyncConnection;
