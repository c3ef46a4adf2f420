//! Non-blocking connection to the Emarsys API.
//!
//! [`AsyncConnection`] returns an [`ApiFuture`] for every call. The future
//! is lazy: no token is generated and nothing is sent until it is polled.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::connection::{Connection, ConnectionCore};
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::RawResponse;
use crate::config::EmarsysConfig;
use crate::error::ConfigError;

/// The future returned by every [`AsyncConnection`] call.
pub type ApiFuture = Pin<Box<dyn Future<Output = Result<Value, HttpError>> + Send + 'static>>;

/// A non-blocking connection to the Emarsys API.
///
/// Returned futures own everything they need, so they can be spawned onto a
/// runtime or awaited after the connection has been dropped.
///
/// # Thread Safety
///
/// `AsyncConnection` is `Send + Sync`, making it safe to share across async
/// tasks.
///
/// # Example
///
/// ```rust,no_run
/// use emarsys_api::{AsyncConnection, Connection, HttpMethod, HttpRequest};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let connection = AsyncConnection::new("customer001", "my-secret")?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/v2/settings/").build()?;
/// let settings = connection.make_call(request).await?;
/// println!("{}", settings["data"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AsyncConnection {
    core: Arc<ConnectionCore>,
    client: reqwest::Client,
}

// Verify AsyncConnection is Send + Sync and its futures are Send at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    const fn assert_send<T: Send>() {}
    assert_send_sync::<AsyncConnection>();
    assert_send::<ApiFuture>();
};

impl AsyncConnection {
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
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::TransportInit {
            message: e.to_string(),
        })?;

        Ok(Self {
            core: Arc::new(ConnectionCore::new(config)),
            client,
        })
    }

    /// Returns the configuration this connection was built from.
    #[must_use]
    pub fn config(&self) -> &EmarsysConfig {
        self.core.config()
    }

    async fn send(
        core: Arc<ConnectionCore>,
        client: reqwest::Client,
        request: HttpRequest,
    ) -> Result<Value, HttpError> {
        request.verify()?;
        let prepared = core.prepare(request);

        let mut req_builder = client.request(prepared.method, &prepared.url);
        for (key, value) in &prepared.headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &prepared.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = prepared.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let body = res.text().await?;

        RawResponse::new(code, body).into_result()
    }
}

impl Connection for AsyncConnection {
    type Output = ApiFuture;

    fn make_call(&self, request: HttpRequest) -> Self::Output {
        Box::pin(Self::send(
            Arc::clone(&self.core),
            self.client.clone(),
            request,
        ))
    }

    fn fail(&self, error: HttpError) -> Self::Output {
        Box::pin(async move { Err(error) })
    }
}
