//! Blocking connection to the Emarsys API.
//!
//! [`SyncConnection`] sends each request on the calling thread and returns
//! the decoded body directly. It must not be used from inside an async
//! runtime; use [`AsyncConnection`](crate::AsyncConnection) there.

use serde_json::Value;

use crate::clients::connection::{Connection, ConnectionCore};
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::RawResponse;
use crate::config::EmarsysConfig;
use crate::error::ConfigError;

/// A blocking connection to the Emarsys API.
///
/// Every call to [`make_call`](Connection::make_call) signs the request with
/// a fresh WSSE token, sends it and waits for the response.
///
/// # Thread Safety
///
/// `SyncConnection` is `Send + Sync` and can be shared between threads.
///
/// # Example
///
/// ```rust,no_run
/// use emarsys_api::{Connection, HttpMethod, HttpRequest, SyncConnection};
///
/// let connection = SyncConnection::new("customer001", "my-secret").unwrap();
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/v2/settings/")
///     .build()
///     .unwrap();
/// let settings = connection.make_call(request).unwrap();
/// println!("{}", settings["data"]);
/// ```
#[derive(Debug)]
pub struct SyncConnection {
    core: ConnectionCore,
    client: reqwest::blocking::Client,
}

// Verify SyncConnection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SyncConnection>();
};

impl SyncConnection {
    /// Creates a connection with default settings for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either credential is empty or the HTTP
    /// transport cannot be initialized.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(EmarsysConfig::new(username, secret)?)
    }

    /// Creates a connection from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP transport cannot be
    /// initialized.
    pub fn from_config(config: EmarsysConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::blocking::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::TransportInit {
            message: e.to_string(),
        })?;

        Ok(Self {
            core: ConnectionCore::new(config),
            client,
        })
    }

    /// Returns the configuration this connection was built from.
    #[must_use]
    pub const fn config(&self) -> &EmarsysConfig {
        self.core.config()
    }

    fn send(&self, request: HttpRequest) -> Result<Value, HttpError> {
        request.verify()?;
        let prepared = self.core.prepare(request);

        let mut req_builder = self.client.request(prepared.method, &prepared.url);
        for (key, value) in &prepared.headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &prepared.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = prepared.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send()?;
        let code = res.status().as_u16();
        let body = res.text()?;

        RawResponse::new(code, body).into_result()
    }
}

impl Connection for SyncConnection {
    type Output = Result<Value, HttpError>;

    fn make_call(&self, request: HttpRequest) -> Self::Output {
        self.send(request)
    }

    fn fail(&self, error: HttpError) -> Self::Output {
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::InvalidCallError;
    use crate::clients::http_request::HttpMethod;
    use crate::config::{BaseUri, Secret, Username};
    use std::time::Duration;

    #[test]
    fn test_new_rejects_empty_credentials() {
        assert_eq!(
            SyncConnection::new("", "secret").unwrap_err(),
            ConfigError::EmptyUsername
        );
        assert_eq!(
            SyncConnection::new("user", "").unwrap_err(),
            ConfigError::EmptySecret
        );
    }

    #[test]
    fn test_from_config_keeps_settings() {
        let config = EmarsysConfig::builder()
            .username(Username::new("user").unwrap())
            .secret(Secret::new("secret").unwrap())
            .base_uri(BaseUri::new("http://localhost:8080").unwrap())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let connection = SyncConnection::from_config(config).unwrap();

        assert_eq!(connection.config().base_uri().as_ref(), "http://localhost:8080");
        assert_eq!(connection.config().timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_request_is_rejected_before_sending() {
        let connection = SyncConnection::new("user", "secret").unwrap();
        let request = HttpRequest {
            http_method: HttpMethod::Post,
            path: "api/v2/contact/".to_string(),
            body: None,
            query: None,
            extra_headers: None,
        };

        let error = connection.make_call(request).unwrap_err();
        assert!(matches!(
            error,
            HttpError::InvalidCall(InvalidCallError::MissingBody { .. })
        ));
    }

    #[test]
    fn test_fail_returns_error_directly() {
        let connection = SyncConnection::new("user", "secret").unwrap();
        let error = connection
            .fail(InvalidCallError::PayloadNotObject { found: "array" }.into())
            .unwrap_err();
        assert!(matches!(error, HttpError::InvalidCall(_)));
    }
}
