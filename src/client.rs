//! The Emarsys API client.
//!
//! [`Emarsys`] owns one connection and one instance of every resource bound
//! to it. The connection decides how calls execute: with a
//! [`SyncConnection`](crate::SyncConnection) every call returns a `Result`,
//! with an [`AsyncConnection`](crate::AsyncConnection) every call returns a
//! future.
//!
//! # Example
//!
//! ```rust,no_run
//! use emarsys_api::{AsyncConnection, Emarsys};
//! use emarsys_api::resources::ContactParams;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Emarsys::new(AsyncConnection::new("customer001", "my-secret")?);
//!
//! let reply = client
//!     .contacts()
//!     .create(&json!({"3": "squirrel@squirrelmail.com"}), &ContactParams::default())
//!     .await?;
//! println!("Created contact {}", reply["data"]["id"]);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::clients::{Connection, InvalidCallError};
use crate::resources::{ApiResource, ContactFields, ContactLists, Contacts, Settings};

/// Names accepted by [`Emarsys::resource`].
pub const RESOURCE_NAMES: &[&str] = &[
    <Contacts<crate::SyncConnection> as ApiResource>::NAME,
    <ContactFields<crate::SyncConnection> as ApiResource>::NAME,
    <ContactLists<crate::SyncConnection> as ApiResource>::NAME,
    <Settings<crate::SyncConnection> as ApiResource>::NAME,
];

/// A resource looked up by name.
#[derive(Debug)]
pub enum Resource<'a, C> {
    /// The contacts resource.
    Contacts(&'a Contacts<C>),
    /// The contact fields resource.
    ContactFields(&'a ContactFields<C>),
    /// The contact lists resource.
    ContactLists(&'a ContactLists<C>),
    /// The settings resource.
    Settings(&'a Settings<C>),
}

impl<C: Connection> Resource<'_, C> {
    /// Returns the name the resource is registered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Contacts(_) => Contacts::<C>::NAME,
            Self::ContactFields(_) => ContactFields::<C>::NAME,
            Self::ContactLists(_) => ContactLists::<C>::NAME,
            Self::Settings(_) => Settings::<C>::NAME,
        }
    }
}

/// Client for the Emarsys API.
///
/// Resources are created once, when the client is built, and share the
/// client's connection.
#[derive(Debug)]
pub struct Emarsys<C> {
    connection: Arc<C>,
    contacts: Contacts<C>,
    contact_fields: ContactFields<C>,
    contact_lists: ContactLists<C>,
    settings: Settings<C>,
}

// Verify Emarsys is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Emarsys<crate::SyncConnection>>();
    assert_send_sync::<Emarsys<crate::AsyncConnection>>();
};

impl<C: Connection> Emarsys<C> {
    /// Creates a client that owns `connection`.
    #[must_use]
    pub fn new(connection: C) -> Self {
        Self::with_shared(Arc::new(connection))
    }

    /// Creates a client around a connection that is shared elsewhere.
    #[must_use]
    pub fn with_shared(connection: Arc<C>) -> Self {
        Self {
            contacts: Contacts::new(Arc::clone(&connection)),
            contact_fields: ContactFields::new(Arc::clone(&connection)),
            contact_lists: ContactLists::new(Arc::clone(&connection)),
            settings: Settings::new(Arc::clone(&connection)),
            connection,
        }
    }

    /// Returns the connection requests are sent through.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Returns the contacts resource.
    #[must_use]
    pub const fn contacts(&self) -> &Contacts<C> {
        &self.contacts
    }

    /// Returns the contact fields resource.
    #[must_use]
    pub const fn contact_fields(&self) -> &ContactFields<C> {
        &self.contact_fields
    }

    /// Returns the contact lists resource.
    #[must_use]
    pub const fn contact_lists(&self) -> &ContactLists<C> {
        &self.contact_lists
    }

    /// Returns the settings resource.
    #[must_use]
    pub const fn settings(&self) -> &Settings<C> {
        &self.settings
    }

    /// Looks up a resource by name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError::UnknownResource`] if no resource is
    /// registered under `name`. Nothing is sent in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emarsys_api::{Emarsys, Resource, SyncConnection};
    ///
    /// let client = Emarsys::new(SyncConnection::new("customer001", "my-secret").unwrap());
    ///
    /// assert!(matches!(client.resource("contacts"), Ok(Resource::Contacts(_))));
    /// assert!(client.resource("campaigns").is_err());
    /// ```
    pub fn resource(&self, name: &str) -> Result<Resource<'_, C>, InvalidCallError> {
        match name {
            n if n == Contacts::<C>::NAME => Ok(Resource::Contacts(&self.contacts)),
            n if n == ContactFields::<C>::NAME => Ok(Resource::ContactFields(&self.contact_fields)),
            n if n == ContactLists::<C>::NAME => Ok(Resource::ContactLists(&self.contact_lists)),
            n if n == Settings::<C>::NAME => Ok(Resource::Settings(&self.settings)),
            _ => Err(InvalidCallError::UnknownResource {
                name: name.to_string(),
            }),
        }
    }
}
