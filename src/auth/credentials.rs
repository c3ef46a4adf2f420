//! API credentials for signing Emarsys requests.

use crate::config::{Secret, Username};

/// The username and secret a connection signs its requests with.
///
/// Credentials are immutable once created and are safe to read from
/// any number of threads. The secret stays masked in `Debug` output.
///
/// # Example
///
/// ```rust
/// use emarsys_api::{Credentials, Secret, Username};
///
/// let credentials = Credentials::new(
///     Username::new("customer001").unwrap(),
///     Secret::new("my-secret").unwrap(),
/// );
/// assert_eq!(credentials.username().as_ref(), "customer001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    secret: Secret,
}

impl Credentials {
    /// Creates credentials from a validated username and secret.
    #[must_use]
    pub const fn new(username: Username, secret: Secret) -> Self {
        Self { username, secret }
    }

    /// Returns the API username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the API secret.
    #[must_use]
    pub const fn secret(&self) -> &Secret {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_secret() {
        let credentials = Credentials::new(
            Username::new("user").unwrap(),
            Secret::new("hidden-value").unwrap(),
        );
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("user"));
        assert!(!debug_output.contains("hidden-value"));
    }
}
