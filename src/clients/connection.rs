//! The execution-mode abstraction shared by all connections.
//!
//! A [`Connection`] performs an authenticated HTTP request and yields the
//! decoded JSON body. What a call *returns* is up to the implementation:
//!
//! - [`SyncConnection`](crate::SyncConnection) returns the result directly
//!   and blocks the calling thread.
//! - [`AsyncConnection`](crate::AsyncConnection) returns a future that does
//!   nothing until it is polled.
//!
//! Resources are generic over `C: Connection` and return `C::Output`, so the
//! same resource code serves both modes.

use std::collections::HashMap;

use serde_json::Value;

use crate::auth::wsse::{WsseToken, WSSE_HEADER};
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::config::EmarsysConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs authenticated requests against the Emarsys API.
///
/// # Example
///
/// A connection that records requests instead of sending them, as used in
/// tests:
///
/// ```rust
/// use std::sync::Mutex;
/// use emarsys_api::{Connection, HttpError, HttpRequest};
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<HttpRequest>>);
///
/// impl Connection for Recorder {
///     type Output = Result<(), HttpError>;
///
///     fn make_call(&self, request: HttpRequest) -> Self::Output {
///         self.0.lock().unwrap().push(request);
///         Ok(())
///     }
///
///     fn fail(&self, error: HttpError) -> Self::Output {
///         Err(error)
///     }
/// }
/// ```
pub trait Connection: Send + Sync {
    /// What a call yields: a result for blocking connections, a future for
    /// async ones.
    type Output;

    /// Sends `request` and yields the decoded JSON body.
    fn make_call(&self, request: HttpRequest) -> Self::Output;

    /// Yields `error` through the same channel a call would.
    fn fail(&self, error: HttpError) -> Self::Output;

    /// Builds a request and sends it, or yields the build error.
    ///
    /// Nothing is sent when `build` fails.
    fn dispatch<F>(&self, build: F) -> Self::Output
    where
        F: FnOnce() -> Result<HttpRequest, HttpError>,
        Self: Sized,
    {
        match build() {
            Ok(request) => self.make_call(request),
            Err(error) => self.fail(error),
        }
    }
}

/// Request preparation shared by the blocking and async connections.
#[derive(Debug)]
pub(crate) struct ConnectionCore {
    config: EmarsysConfig,
    default_headers: HashMap<String, String>,
}

/// A request ready to hand to a transport.
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl ConnectionCore {
    pub(crate) fn new(config: EmarsysConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Emarsys API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            config,
            default_headers,
        }
    }

    pub(crate) const fn config(&self) -> &EmarsysConfig {
        &self.config
    }

    pub(crate) const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves the URL, merges headers and signs the request.
    ///
    /// A fresh WSSE token is generated on every call and is applied after
    /// any extra headers.
    pub(crate) fn prepare(&self, request: HttpRequest) -> PreparedRequest {
        let url = self.config.base_uri().join(&request.path);

        let mut headers = self.default_headers().clone();
        if let Some(extra) = request.extra_headers {
            for (key, value) in extra {
                headers.insert(key, value);
            }
        }
        headers.retain(|key, _| !key.eq_ignore_ascii_case(WSSE_HEADER));

        let token = WsseToken::generate(self.config.credentials());
        headers.insert(WSSE_HEADER.to_string(), token.header_value());

        tracing::debug!(
            method = request.http_method.as_str(),
            path = %request.path,
            "Sending request to Emarsys API"
        );

        PreparedRequest {
            method: request.http_method.to_reqwest(),
            url,
            headers,
            query: request.query,
            body: request.body.as_ref().map(Value::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use crate::config::{BaseUri, Secret, Username};
    use serde_json::json;

    fn core() -> ConnectionCore {
        ConnectionCore::new(EmarsysConfig::new("test_username", "test_secret").unwrap())
    }

    #[test]
    fn test_user_agent_header_format() {
        let core = core();
        let user_agent = core.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Emarsys API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = EmarsysConfig::builder()
            .username(Username::new("user").unwrap())
            .secret(Secret::new("secret").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let core = ConnectionCore::new(config);

        let user_agent = core.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_prepare_joins_url_and_serializes_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "api/v2/contact/")
            .body(json!({"3": "squirrel@squirrelmail.com"}))
            .build()
            .unwrap();

        let prepared = core().prepare(request);

        assert_eq!(prepared.method, reqwest::Method::POST);
        assert_eq!(prepared.url, "https://api.emarsys.net/api/v2/contact/");
        assert_eq!(
            prepared.body.as_deref(),
            Some(r#"{"3":"squirrel@squirrelmail.com"}"#)
        );
        assert_eq!(
            prepared.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_prepare_respects_custom_base_uri() {
        let config = EmarsysConfig::builder()
            .username(Username::new("user").unwrap())
            .secret(Secret::new("secret").unwrap())
            .base_uri(BaseUri::new("http://127.0.0.1:9000/").unwrap())
            .build()
            .unwrap();

        let request = HttpRequest::builder(HttpMethod::Get, "api/v2/settings/")
            .build()
            .unwrap();
        let prepared = ConnectionCore::new(config).prepare(request);

        assert_eq!(prepared.url, "http://127.0.0.1:9000/api/v2/settings/");
        assert!(prepared.body.is_none());
    }

    #[test]
    fn test_every_prepared_request_is_signed() {
        let core = core();
        let request = HttpRequest::builder(HttpMethod::Get, "api/v2/settings/")
            .build()
            .unwrap();

        let first = core.prepare(request.clone());
        let second = core.prepare(request);

        let first_wsse = first.headers.get(WSSE_HEADER).unwrap();
        let second_wsse = second.headers.get(WSSE_HEADER).unwrap();
        assert!(first_wsse.starts_with("UsernameToken Username=\"test_username\""));
        assert_ne!(first_wsse, second_wsse);
    }

    #[test]
    fn test_extra_headers_cannot_replace_wsse() {
        let request = HttpRequest::builder(HttpMethod::Get, "api/v2/settings/")
            .header("x-wsse", "forged")
            .header("X-WSSE", "forged")
            .header("X-Custom", "value")
            .build()
            .unwrap();

        let prepared = core().prepare(request);

        let wsse: Vec<_> = prepared
            .headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(WSSE_HEADER))
            .collect();
        assert_eq!(wsse.len(), 1);
        assert!(wsse[0].1.starts_with("UsernameToken"));
        assert_eq!(prepared.headers.get("X-Custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_config_accessor() {
        assert_eq!(
            core().config().credentials().username().as_ref(),
            "test_username"
        );
    }
}
