//! Configuration types for the Emarsys API client.
//!
//! # Overview
//!
//! - [`EmarsysConfig`]: credentials plus transport settings for a connection
//! - [`EmarsysConfigBuilder`]: a builder for constructing [`EmarsysConfig`]
//! - [`Username`], [`Secret`], [`BaseUri`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use emarsys_api::{EmarsysConfig, Username, Secret};
//!
//! let config = EmarsysConfig::builder()
//!     .username(Username::new("customer001").unwrap())
//!     .secret(Secret::new("my-secret").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_uri().as_ref(), "https://api.emarsys.net");
//! ```

mod newtypes;

pub use newtypes::{BaseUri, Secret, Username};

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for a connection to the Emarsys API.
///
/// `EmarsysConfig` is immutable once built. It is `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct EmarsysConfig {
    credentials: Credentials,
    base_uri: BaseUri,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl EmarsysConfig {
    /// Creates a new builder for constructing an `EmarsysConfig`.
    #[must_use]
    pub fn builder() -> EmarsysConfigBuilder {
        EmarsysConfigBuilder::new()
    }

    /// Creates a configuration with default settings for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] or [`ConfigError::EmptySecret`]
    /// if either value is empty.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder()
            .username(Username::new(username)?)
            .secret(Secret::new(secret)?)
            .build()
    }

    /// Returns the credentials used to sign requests.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URI requests are sent to.
    #[must_use]
    pub const fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify EmarsysConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EmarsysConfig>();
};

/// Builder for constructing [`EmarsysConfig`] instances.
///
/// `username` and `secret` are required.
///
/// # Defaults
///
/// - `base_uri`: `https://api.emarsys.net/`
/// - `timeout`: `None` (reqwest's default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct EmarsysConfigBuilder {
    username: Option<Username>,
    secret: Option<Secret>,
    base_uri: Option<BaseUri>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl EmarsysConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API username (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the API secret (required).
    #[must_use]
    pub fn secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Sets the base URI, e.g. to point at a mock server or proxy.
    #[must_use]
    pub fn base_uri(mut self, base_uri: BaseUri) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Sets the total request timeout used by the HTTP transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`EmarsysConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `username` or
    /// `secret` are not set.
    pub fn build(self) -> Result<EmarsysConfig, ConfigError> {
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let secret = self
            .secret
            .ok_or(ConfigError::MissingRequiredField { field: "secret" })?;

        Ok(EmarsysConfig {
            credentials: Credentials::new(username, secret),
            base_uri: self.base_uri.unwrap_or_default(),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
