//! Authentication types for the Emarsys API client.
//!
//! Emarsys authenticates every request with a WSSE `UsernameToken` header
//! derived from the API username and secret.
//!
//! - [`Credentials`]: the username/secret pair a connection signs with
//! - [`wsse`]: token generation and `X-WSSE` header formatting

mod credentials;
pub mod wsse;

pub use credentials::Credentials;
pub use wsse::WsseToken;
