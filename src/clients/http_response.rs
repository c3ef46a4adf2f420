//! HTTP response handling for the Emarsys API client.
//!
//! Successful responses are returned to the caller as the decoded JSON body,
//! unchanged. [`Reply`] offers a typed, read-only view of the Emarsys reply
//! envelope (`data`, `replyCode`, `replyText`) for callers who want one.

use serde::Deserialize;
use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError, ResponseDecodeError};

/// The Emarsys reply envelope.
///
/// # Example
///
/// ```rust
/// use emarsys_api::Reply;
/// use serde_json::json;
///
/// let body = json!({"data": {"id": 19739576}, "replyCode": 0, "replyText": "OK"});
/// let reply = Reply::from_value(&body).unwrap();
///
/// assert!(reply.is_ok());
/// assert_eq!(reply.data["id"], 19739576);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Reply {
    /// The payload of the reply.
    #[serde(default)]
    pub data: Value,
    /// Emarsys status code; `0` means success.
    #[serde(rename = "replyCode")]
    pub reply_code: i64,
    /// Human-readable status text.
    #[serde(rename = "replyText", default)]
    pub reply_text: String,
}

impl Reply {
    /// Reads the envelope out of a decoded response body.
    ///
    /// Returns `None` if the body is not an Emarsys envelope.
    #[must_use]
    pub fn from_value(body: &Value) -> Option<Self> {
        Self::deserialize(body).ok()
    }

    /// Returns `true` if `replyCode` is `0`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.reply_code == 0
    }
}

/// A response as received from the transport, before interpretation.
#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
    pub code: u16,
    pub body: String,
}

impl RawResponse {
    pub(crate) const fn new(code: u16, body: String) -> Self {
        Self { code, body }
    }

    /// Returns `true` if the status code is in the 2xx range.
    pub(crate) const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Turns the response into the decoded body or the matching error.
    pub(crate) fn into_result(self) -> Result<Value, HttpError> {
        if !self.is_ok() {
            let envelope = serde_json::from_str::<Value>(&self.body).ok();
            let reply_code = envelope
                .as_ref()
                .and_then(|body| body.get("replyCode"))
                .and_then(Value::as_i64);
            let reply_text = envelope
                .as_ref()
                .and_then(|body| body.get("replyText"))
                .and_then(Value::as_str)
                .map(String::from);

            tracing::debug!(
                status = self.code,
                reply_code,
                "Emarsys API returned a non-success status"
            );

            return Err(HttpError::Response(HttpResponseError {
                code: self.code,
                reply_code,
                reply_text,
                body: self.body,
            }));
        }

        match serde_json::from_str(&self.body) {
            Ok(value) => Ok(value),
            Err(source) => {
                tracing::warn!(status = self.code, "Emarsys API response body is not valid JSON");
                Err(HttpError::Decode(ResponseDecodeError {
                    code: self.code,
                    body: self.body,
                    source,
                }))
            }
        }
    }
}
