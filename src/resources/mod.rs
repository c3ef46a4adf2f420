//! Emarsys API resources.
//!
//! Each resource groups one family of remote operations and exposes one
//! method per action. Resources are generic over a [`Connection`] and return
//! its `Output`: a `Result` for [`SyncConnection`](crate::SyncConnection), a
//! future for [`AsyncConnection`](crate::AsyncConnection).
//!
//! # Overview
//!
//! - [`Contacts`]: create, query, update and delete contacts
//! - [`ContactFields`]: create, list and delete contact fields and their
//!   choices
//! - [`ContactLists`]: list, create and delete contact lists and manage
//!   their members
//! - [`Settings`]: account settings
//! - [`KeyId`]: identifies which field a contact is keyed by
//!
//! Resources are usually reached through [`Emarsys`](crate::Emarsys), but
//! can be built directly from a shared connection:
//!
//! ```rust
//! use std::sync::Arc;
//! use emarsys_api::SyncConnection;
//! use emarsys_api::resources::{ApiResource, Contacts};
//!
//! let connection = Arc::new(SyncConnection::new("customer001", "my-secret").unwrap());
//! let contacts = Contacts::new(connection);
//! assert_eq!(Contacts::<SyncConnection>::ENDPOINT, "api/v2/contact/");
//! ```
//!
//! # Payloads
//!
//! Payload arguments accept any `Serialize` value. The serialized value must
//! be a JSON object; anything else fails with
//! [`InvalidCallError::PayloadNotObject`] before a request is made.

mod contact;
mod contact_field;
mod contact_list;
mod settings;

pub use contact::{
    BatchUpdateParams, ContactParams, ContactQueryParams, ContactUpdateParams, Contacts,
};
pub use contact_field::{ContactFields, FieldType};
pub use contact_list::{ContactListParams, ContactLists};
pub use settings::Settings;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::{Connection, InvalidCallError};

/// A resource bound to a connection.
pub trait ApiResource: Sized {
    /// The connection requests are sent through.
    type Connection: Connection;

    /// Name used by [`Emarsys::resource`](crate::Emarsys::resource).
    const NAME: &'static str;

    /// Base path of the resource, relative to the API base URI.
    const ENDPOINT: &'static str;

    /// Binds the resource to a shared connection.
    fn new(connection: Arc<Self::Connection>) -> Self;

    /// Returns the connection this resource sends requests through.
    fn connection(&self) -> &Arc<Self::Connection>;
}

/// Identifies the field a contact is keyed by.
///
/// Emarsys accepts either a field id or one of the system keys.
///
/// # Example
///
/// ```rust
/// use emarsys_api::KeyId;
///
/// assert_eq!(KeyId::EMAIL.to_string(), "3");
/// assert_eq!(KeyId::Uid.to_string(), "uid");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// A contact field id.
    Field(u32),
    /// The internal contact id.
    Id,
    /// The contact's unique identifier.
    Uid,
    /// The contact's external identifier.
    Eid,
}

impl KeyId {
    /// The email field, Emarsys' default contact key.
    pub const EMAIL: Self = Self::Field(3);
}

impl Default for KeyId {
    fn default() -> Self {
        Self::EMAIL
    }
}

impl From<u32> for KeyId {
    fn from(field_id: u32) -> Self {
        Self::Field(field_id)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(id) => write!(f, "{id}"),
            Self::Id => write!(f, "id"),
            Self::Uid => write!(f, "uid"),
            Self::Eid => write!(f, "eid"),
        }
    }
}

impl Serialize for KeyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field(id) => serializer.serialize_u32(*id),
            Self::Id => serializer.serialize_str("id"),
            Self::Uid => serializer.serialize_str("uid"),
            Self::Eid => serializer.serialize_str("eid"),
        }
    }
}

/// Serializes `payload` and checks that it is a JSON object.
pub(crate) fn object_payload<T: Serialize + ?Sized>(
    payload: &T,
) -> Result<Map<String, Value>, InvalidCallError> {
    let value = serde_json::to_value(payload).map_err(|e| InvalidCallError::Serialization {
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(InvalidCallError::PayloadNotObject {
            found: crate::clients::json_type_name(&other),
        }),
    }
}

/// Merges the serialized fields of `params` into `payload`.
///
/// Fields of `params` replace payload fields of the same name.
pub(crate) fn merge_params<P: Serialize>(
    payload: &mut Map<String, Value>,
    params: &P,
) -> Result<(), InvalidCallError> {
    payload.extend(object_payload(params)?);
    Ok(())
}

/// Builds a path from a template by interpolating percent-encoded segments.
///
/// Replaces `{name}` placeholders in the template with values from `ids`.
pub(crate) fn build_path<V: fmt::Display>(template: &str, ids: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(&value.to_string()));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeyId>();
    assert_send_sync::<Contacts<crate::SyncConnection>>();
    assert_send_sync::<ContactFields<crate::AsyncConnection>>();
    assert_send_sync::<ContactLists<crate::SyncConnection>>();
    assert_send_sync::<Settings<crate::AsyncConnection>>();
};
