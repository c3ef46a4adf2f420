//! WSSE `UsernameToken` authentication for the Emarsys API.
//!
//! Every request to Emarsys carries an `X-WSSE` header built from the API
//! username, a random nonce, a creation timestamp and a password digest:
//!
//! ```text
//! password_digest = base64(hex(sha1(nonce + created + secret)))
//! ```
//!
//! Emarsys rejects stale timestamps and reused nonces, so a new token is
//! generated for each request.
//!
//! # Example
//!
//! ```rust
//! use emarsys_api::auth::wsse::WsseToken;
//! use emarsys_api::EmarsysConfig;
//!
//! let config = EmarsysConfig::new("customer001", "my-secret").unwrap();
//! let token = WsseToken::generate(config.credentials());
//!
//! assert_eq!(token.nonce().len(), 32);
//! assert!(token.header_value().starts_with("UsernameToken Username=\"customer001\""));
//! ```

use base64::prelude::*;
use chrono::Utc;
use rand::RngCore;
use sha1::{Digest, Sha1};

use crate::auth::Credentials;

/// Name of the authentication header.
pub const WSSE_HEADER: &str = "X-WSSE";

/// `strftime` format of the `Created` field.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// A single-use WSSE token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WsseToken {
    username: String,
    nonce: String,
    created: String,
    password_digest: String,
}

impl WsseToken {
    /// Generates a token with a random nonce and the current UTC time.
    #[must_use]
    pub fn generate(credentials: &Credentials) -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let nonce = hex::encode(bytes);
        let created = Utc::now().format(CREATED_FORMAT).to_string();

        Self::with_parts(credentials, nonce, created)
    }

    /// Builds a token from an explicit nonce and timestamp.
    ///
    /// The result depends only on its inputs.
    #[must_use]
    pub fn with_parts(
        credentials: &Credentials,
        nonce: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        let nonce = nonce.into();
        let created = created.into();
        let password_digest = password_digest(&nonce, &created, credentials.secret().as_ref());

        Self {
            username: credentials.username().as_ref().to_string(),
            nonce,
            created,
            password_digest,
        }
    }

    /// Returns the nonce.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created(&self) -> &str {
        &self.created
    }

    /// Returns the password digest.
    #[must_use]
    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    /// Formats the token as an `X-WSSE` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!(
            "UsernameToken Username=\"{}\",PasswordDigest=\"{}\",Nonce=\"{}\",Created=\"{}\"",
            self.username, self.password_digest, self.nonce, self.created
        )
    }
}

/// Computes the WSSE password digest for a nonce, timestamp and secret.
///
/// # Example
///
/// ```rust
/// use emarsys_api::auth::wsse::password_digest;
///
/// let digest = password_digest("nonce", "2017-01-16T19:30:00+00:00", "secret");
/// assert_eq!(digest.len(), 56); // base64 of 40 hex chars
/// ```
#[must_use]
pub fn password_digest(nonce: &str, created: &str, secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(nonce.as_bytes());
    hasher.update(created.as_bytes());
    hasher.update(secret.as_bytes());
    let hex_digest = hex::encode(hasher.finalize());
    BASE64_STANDARD.encode(hex_digest)
}
