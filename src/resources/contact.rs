//! Contacts resource.
//!
//! Contacts are keyed by a [`KeyId`]; when none is given Emarsys uses the
//! email field (`3`).
//!
//! # Example
//!
//! ```rust,no_run
//! use emarsys_api::{Emarsys, SyncConnection};
//! use emarsys_api::resources::ContactParams;
//! use serde_json::json;
//!
//! let client = Emarsys::new(SyncConnection::new("customer001", "my-secret").unwrap());
//!
//! let reply = client
//!     .contacts()
//!     .create(&json!({"3": "squirrel@squirrelmail.com"}), &ContactParams::default())
//!     .unwrap();
//! assert_eq!(reply["replyCode"], 0);
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::{merge_params, object_payload, ApiResource, KeyId};
use crate::clients::{Connection, HttpMethod, HttpRequest};

const NAME: &str = "contacts";
const ENDPOINT: &str = "api/v2/contact/";

/// Optional keys sent with a single contact on create.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactParams {
    /// The field identifying the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Identifies the external application creating the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// Optional keys sent with a single contact on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactUpdateParams {
    /// The field identifying the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Identifies the external application modifying the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Creates the contact if it does not exist.
    #[serde(skip)]
    pub upsert: bool,
}

/// Optional settings for [`Contacts::update_many`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchUpdateParams {
    /// Identifies the external application modifying the contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Creates contacts that do not exist.
    #[serde(skip)]
    pub upsert: bool,
}

/// Optional filters for [`Contacts::query`].
///
/// Each option is sent only when set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactQueryParams {
    /// Only return contacts whose field matches the value.
    pub filter: Option<(KeyId, String)>,
    /// Maximum number of contacts to return.
    pub limit: Option<u32>,
    /// Number of contacts to skip.
    pub offset: Option<u32>,
    /// Leave out contacts whose returned field is empty.
    pub exclude_empty: Option<bool>,
}

#[derive(Serialize)]
struct ManyContacts<'a, T> {
    contacts: &'a [T],
    #[serde(skip_serializing_if = "Option::is_none")]
    key_id: Option<KeyId>,
}

#[derive(Serialize)]
struct KeyedContacts<'a, T> {
    key_id: KeyId,
    contacts: &'a [T],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetData<'a, V> {
    key_id: KeyId,
    key_values: &'a [V],
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [KeyId]>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactHistory<'a> {
    contacts: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct CheckIds<'a, V> {
    key_id: KeyId,
    external_ids: &'a [V],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    get_multiple_ids: bool,
}

#[derive(Serialize)]
struct KeyOnly {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_id: Option<KeyId>,
}

/// Operations on Emarsys contacts.
#[derive(Debug)]
pub struct Contacts<C> {
    connection: Arc<C>,
}

impl<C: Connection> ApiResource for Contacts<C> {
    type Connection = C;

    const NAME: &'static str = NAME;
    const ENDPOINT: &'static str = ENDPOINT;

    fn new(connection: Arc<C>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> &Arc<C> {
        &self.connection
    }
}

impl<C: Connection> Contacts<C> {
    /// Creates a contact.
    ///
    /// `contact` maps field ids to values, e.g. `{"3": "a@b.c"}`.
    pub fn create<T>(&self, contact: &T, params: &ContactParams) -> C::Output
    where
        T: Serialize + ?Sized,
    {
        self.connection.dispatch(|| {
            let mut payload = object_payload(contact)?;
            merge_params(&mut payload, params)?;
            Ok(HttpRequest::builder(HttpMethod::Post, ENDPOINT)
                .body(payload)
                .build()?)
        })
    }

    /// Creates several contacts in one call.
    pub fn create_many<T: Serialize>(&self, contacts: &[T], key_id: Option<KeyId>) -> C::Output {
        self.connection.dispatch(|| {
            let payload = object_payload(&ManyContacts { contacts, key_id })?;
            Ok(HttpRequest::builder(HttpMethod::Post, ENDPOINT)
                .body(payload)
                .build()?)
        })
    }

    /// Lists the `return_field` of contacts, optionally filtered by one
    /// field value.
    pub fn query(&self, return_field: KeyId, params: &ContactQueryParams) -> C::Output {
        self.connection.dispatch(|| {
            let mut builder =
                HttpRequest::builder(HttpMethod::Get, format!("{ENDPOINT}query/"))
                    .query_param("return", return_field.to_string());

            if let Some((field, value)) = &params.filter {
                builder = builder.query_param(field.to_string(), value.clone());
            }
            if let Some(limit) = params.limit {
                builder = builder.query_param("limit", limit.to_string());
            }
            if let Some(offset) = params.offset {
                builder = builder.query_param("offset", offset.to_string());
            }
            if let Some(exclude_empty) = params.exclude_empty {
                builder = builder.query_param("excludeempty", exclude_empty.to_string());
            }

            Ok(builder.build()?)
        })
    }

    /// Returns the field values of the contacts identified by `key_values`.
    ///
    /// All fields are returned when `fields` is `None`.
    pub fn get_data<V: Serialize>(
        &self,
        key_id: KeyId,
        key_values: &[V],
        fields: Option<&[KeyId]>,
    ) -> C::Output {
        self.connection.dispatch(|| {
            let payload = object_payload(&GetData {
                key_id,
                key_values,
                fields,
            })?;
            Ok(HttpRequest::builder(HttpMethod::Post, format!("{ENDPOINT}getdata/"))
                .body(payload)
                .build()?)
        })
    }

    /// Returns the contact data history of the given internal contact ids.
    pub fn get_history(
        &self,
        contacts: &[u64],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> C::Output {
        self.connection.dispatch(|| {
            let payload = object_payload(&ContactHistory {
                contacts,
                start_date,
                end_date,
            })?;
            Ok(
                HttpRequest::builder(HttpMethod::Post, format!("{ENDPOINT}getcontacthistory/"))
                    .body(payload)
                    .build()?,
            )
        })
    }

    /// Looks up the internal id of the contact whose `key_id` field equals
    /// `value`.
    pub fn get_internal_id(&self, key_id: KeyId, value: &str) -> C::Output {
        self.connection.dispatch(|| {
            Ok(HttpRequest::builder(HttpMethod::Get, ENDPOINT)
                .query_param(key_id.to_string(), value)
                .build()?)
        })
    }

    /// Resolves external ids to internal contact ids.
    ///
    /// With `accept_duplicates`, every contact sharing an external id is
    /// returned.
    pub fn check_ids<V: Serialize>(
        &self,
        key_id: KeyId,
        key_values: &[V],
        accept_duplicates: bool,
    ) -> C::Output {
        self.connection.dispatch(|| {
            let payload = object_payload(&CheckIds {
                key_id,
                external_ids: key_values,
                get_multiple_ids: accept_duplicates,
            })?;
            Ok(HttpRequest::builder(HttpMethod::Post, format!("{ENDPOINT}checkids/"))
                .body(payload)
                .build()?)
        })
    }

    /// Updates a contact, or creates it when `params.upsert` is set.
    pub fn update<T>(&self, contact: &T, params: &ContactUpdateParams) -> C::Output
    where
        T: Serialize + ?Sized,
    {
        self.connection.dispatch(|| {
            let mut payload = object_payload(contact)?;
            merge_params(&mut payload, params)?;
            let mut builder = HttpRequest::builder(HttpMethod::Put, ENDPOINT).body(payload);
            if params.upsert {
                builder = builder.query_param("create_if_not_exists", "1");
            }
            Ok(builder.build()?)
        })
    }

    /// Updates several contacts in one call.
    pub fn update_many<T: Serialize>(
        &self,
        key_id: KeyId,
        contacts: &[T],
        params: &BatchUpdateParams,
    ) -> C::Output {
        self.connection.dispatch(|| {
            let mut payload = object_payload(&KeyedContacts { key_id, contacts })?;
            merge_params(&mut payload, params)?;
            let mut builder = HttpRequest::builder(HttpMethod::Put, ENDPOINT).body(payload);
            if params.upsert {
                builder = builder.query_param("create_if_not_exists", "1");
            }
            Ok(builder.build()?)
        })
    }

    /// Deletes a contact.
    pub fn delete<T>(&self, contact: &T, key_id: Option<KeyId>) -> C::Output
    where
        T: Serialize + ?Sized,
    {
        self.connection.dispatch(|| {
            let mut payload = object_payload(contact)?;
            merge_params(&mut payload, &KeyOnly { key_id })?;
            Ok(HttpRequest::builder(HttpMethod::Post, format!("{ENDPOINT}delete/"))
                .body(payload)
                .build()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, InvalidCallError};
    use crate::resources::testing::RecordingConnection;
    use serde_json::json;

    fn contacts() -> Contacts<RecordingConnection> {
        Contacts::new(Arc::new(RecordingConnection))
    }

    #[test]
    fn test_create_sends_contact_as_body() {
        let request = contacts()
            .create(
                &json!({"3": "squirrel@squirrelmail.com"}),
                &ContactParams::default(),
            )
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/contact/");
        assert_eq!(request.body, Some(json!({"3": "squirrel@squirrelmail.com"})));
        assert!(request.query.is_none());
    }

    #[test]
    fn test_create_merges_key_and_source() {
        let params = ContactParams {
            key_id: Some(KeyId::Eid),
            source_id: Some("crm".to_string()),
        };
        let request = contacts()
            .create(&json!({"3": "a@b.c", "eid": "x-1"}), &params)
            .unwrap();

        assert_eq!(
            request.body,
            Some(json!({"3": "a@b.c", "eid": "x-1", "key_id": "eid", "source_id": "crm"}))
        );
    }

    #[test]
    fn test_create_rejects_non_object_payload() {
        let error = contacts()
            .create(&["squirrel@squirrelmail.com"], &ContactParams::default())
            .unwrap_err();

        assert!(matches!(
            error,
            HttpError::InvalidCall(InvalidCallError::PayloadNotObject { found: "array" })
        ));
    }

    #[test]
    fn test_create_many() {
        let request = contacts()
            .create_many(&[json!({"3": "a@b.c"}), json!({"3": "d@e.f"})], None)
            .unwrap();

        assert_eq!(request.path, "api/v2/contact/");
        assert_eq!(
            request.body,
            Some(json!({"contacts": [{"3": "a@b.c"}, {"3": "d@e.f"}]}))
        );

        let request = contacts()
            .create_many(&[json!({"3": "a@b.c"})], Some(KeyId::EMAIL))
            .unwrap();
        assert_eq!(request.body.unwrap()["key_id"], json!(3));
    }

    #[test]
    fn test_query_with_return_field_only() {
        let request = contacts()
            .query(KeyId::EMAIL, &ContactQueryParams::default())
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "api/v2/contact/query/");
        assert!(request.body.is_none());

        let query = request.query.unwrap();
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("return"), Some(&"3".to_string()));
    }

    #[test]
    fn test_query_options_are_independent() {
        let params = ContactQueryParams {
            offset: Some(100),
            exclude_empty: Some(true),
            ..Default::default()
        };
        let query = contacts().query(KeyId::EMAIL, &params).unwrap().query.unwrap();

        assert_eq!(query.get("offset"), Some(&"100".to_string()));
        assert_eq!(query.get("excludeempty"), Some(&"true".to_string()));
        assert!(!query.contains_key("limit"));
    }

    #[test]
    fn test_query_with_filter_and_limit() {
        let params = ContactQueryParams {
            filter: Some((KeyId::Field(1), "Squirrel".to_string())),
            limit: Some(10),
            ..Default::default()
        };
        let query = contacts().query(KeyId::Id, &params).unwrap().query.unwrap();

        assert_eq!(query.get("return"), Some(&"id".to_string()));
        assert_eq!(query.get("1"), Some(&"Squirrel".to_string()));
        assert_eq!(query.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn test_get_data() {
        let request = contacts()
            .get_data(KeyId::EMAIL, &["a@b.c"], Some(&[KeyId::Field(1), KeyId::Field(2)]))
            .unwrap();

        assert_eq!(request.path, "api/v2/contact/getdata/");
        assert_eq!(
            request.body,
            Some(json!({"keyId": 3, "keyValues": ["a@b.c"], "fields": [1, 2]}))
        );

        let request = contacts().get_data(KeyId::Id, &[1, 2], None).unwrap();
        assert_eq!(request.body, Some(json!({"keyId": "id", "keyValues": [1, 2]})));
    }

    #[test]
    fn test_get_history_formats_dates() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2017, 1, 31).unwrap();
        let request = contacts()
            .get_history(&[19_739_576], Some(start), Some(end))
            .unwrap();

        assert_eq!(request.path, "api/v2/contact/getcontacthistory/");
        assert_eq!(
            request.body,
            Some(json!({
                "contacts": [19739576],
                "startDate": "2017-01-01",
                "endDate": "2017-01-31"
            }))
        );

        let request = contacts().get_history(&[1], None, None).unwrap();
        assert_eq!(request.body, Some(json!({"contacts": [1]})));
    }

    #[test]
    fn test_get_internal_id() {
        let request = contacts()
            .get_internal_id(KeyId::EMAIL, "squirrel@squirrelmail.com")
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "api/v2/contact/");
        assert_eq!(
            request.query.unwrap().get("3"),
            Some(&"squirrel@squirrelmail.com".to_string())
        );
    }

    #[test]
    fn test_check_ids() {
        let request = contacts()
            .check_ids(KeyId::EMAIL, &["a@b.c", "d@e.f"], false)
            .unwrap();

        assert_eq!(request.path, "api/v2/contact/checkids/");
        assert_eq!(
            request.body,
            Some(json!({"key_id": 3, "external_ids": ["a@b.c", "d@e.f"]}))
        );

        let request = contacts().check_ids(KeyId::EMAIL, &["a@b.c"], true).unwrap();
        assert_eq!(request.body.unwrap()["get_multiple_ids"], json!(true));
    }

    #[test]
    fn test_update_without_upsert() {
        let params = ContactUpdateParams {
            key_id: Some(KeyId::EMAIL),
            ..Default::default()
        };
        let request = contacts()
            .update(&json!({"3": "a@b.c", "1": "Squirrel"}), &params)
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(request.path, "api/v2/contact/");
        assert_eq!(
            request.body,
            Some(json!({"3": "a@b.c", "1": "Squirrel", "key_id": 3}))
        );
        assert!(request.query.is_none());
    }

    #[test]
    fn test_update_with_upsert() {
        let params = ContactUpdateParams {
            upsert: true,
            ..Default::default()
        };
        let request = contacts().update(&json!({"3": "a@b.c"}), &params).unwrap();

        assert_eq!(request.body, Some(json!({"3": "a@b.c"})));
        assert_eq!(
            request.query.unwrap().get("create_if_not_exists"),
            Some(&"1".to_string())
        );
    }

    #[test]
    fn test_update_many() {
        let params = BatchUpdateParams {
            source_id: Some("crm".to_string()),
            upsert: true,
        };
        let request = contacts()
            .update_many(KeyId::EMAIL, &[json!({"3": "a@b.c", "1": "A"})], &params)
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(
            request.body,
            Some(json!({
                "key_id": 3,
                "contacts": [{"3": "a@b.c", "1": "A"}],
                "source_id": "crm"
            }))
        );
        assert_eq!(
            request.query.unwrap().get("create_if_not_exists"),
            Some(&"1".to_string())
        );
    }

    #[test]
    fn test_delete() {
        let request = contacts()
            .delete(&json!({"3": "a@b.c"}), Some(KeyId::EMAIL))
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/contact/delete/");
        assert_eq!(request.body, Some(json!({"3": "a@b.c", "key_id": 3})));

        let request = contacts().delete(&json!({"3": "a@b.c"}), None).unwrap();
        assert_eq!(request.body, Some(json!({"3": "a@b.c"})));
    }

    #[test]
    fn test_resource_constants() {
        assert_eq!(Contacts::<RecordingConnection>::NAME, "contacts");
        assert_eq!(Contacts::<RecordingConnection>::ENDPOINT, "api/v2/contact/");
    }
}
