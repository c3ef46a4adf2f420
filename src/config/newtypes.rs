//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Emarsys API username.
///
/// # Example
///
/// ```rust
/// use emarsys_api::Username;
///
/// let username = Username::new("customer001").unwrap();
/// assert_eq!(username.as_ref(), "customer001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Emarsys API secret.
///
/// The `Debug` implementation masks the value, displaying only
/// `Secret(*****)`, so the secret never leaks into logs.
///
/// # Example
///
/// ```rust
/// use emarsys_api::Secret;
///
/// let secret = Secret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "Secret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a new validated secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for Secret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

/// A validated base URI for the Emarsys API.
///
/// The scheme must be `http` or `https` and a host must be present. The
/// stored value never ends with a slash so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use emarsys_api::BaseUri;
///
/// let uri = BaseUri::new("https://api.emarsys.net/").unwrap();
/// assert_eq!(uri.as_ref(), "https://api.emarsys.net");
/// assert_eq!(uri.join("api/v2/settings/"), "https://api.emarsys.net/api/v2/settings/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUri(String);

impl BaseUri {
    /// The production Emarsys API endpoint.
    pub const EMARSYS: &'static str = "https://api.emarsys.net/";

    /// Creates a new validated base URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUri`] if the URI has no `http(s)`
    /// scheme or no host.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let uri = uri.trim();

        let invalid = || ConfigError::InvalidBaseUri {
            uri: uri.to_string(),
        };

        let (scheme, remainder) = uri.split_once("://").ok_or_else(invalid)?;
        if !matches!(scheme.to_ascii_lowercase().as_str(), "http" | "https") {
            return Err(invalid());
        }

        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if remainder[..host_end].is_empty() || remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        Ok(Self(uri.trim_end_matches('/').to_string()))
    }

    /// Joins a path onto this base URI with exactly one separating slash.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for BaseUri {
    fn default() -> Self {
        Self(Self::EMARSYS.trim_end_matches('/').to_string())
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
