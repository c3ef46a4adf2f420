//! Contact lists resource.
//!
//! Removing contacts from a list or deleting the list never deletes the
//! contacts themselves.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Map;

use super::{build_path, merge_params, object_payload, ApiResource, KeyId};
use crate::clients::{Connection, HttpMethod, HttpRequest};

const NAME: &str = "contact_lists";
const ENDPOINT: &str = "api/v2/contactlist/";

/// Options for [`ContactLists::create`].
///
/// `key_id` defaults to the email field. Unset options are left out of the
/// request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactListParams {
    /// The field the `external_ids` refer to.
    pub key_id: KeyId,
    /// Contacts to add to the new list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ids: Option<Vec<String>>,
    /// A description of the list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ContactListParams {
    fn default() -> Self {
        Self {
            key_id: KeyId::EMAIL,
            external_ids: None,
            description: None,
        }
    }
}

#[derive(Serialize)]
struct NamedList<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ListMembers<'a, V> {
    key_id: KeyId,
    external_ids: &'a [V],
}

/// Operations on contact lists.
#[derive(Debug)]
pub struct ContactLists<C> {
    connection: Arc<C>,
}

impl<C: Connection> ApiResource for ContactLists<C> {
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

impl<C: Connection> ContactLists<C> {
    /// Creates a contact list.
    pub fn create(&self, name: &str, params: &ContactListParams) -> C::Output {
        self.connection.dispatch(|| {
            let mut payload = object_payload(&NamedList { name })?;
            merge_params(&mut payload, params)?;
            Ok(HttpRequest::builder(HttpMethod::Post, ENDPOINT)
                .body(payload)
                .build()?)
        })
    }

    /// Lists every contact list of the account.
    pub fn list(&self) -> C::Output {
        self.connection
            .dispatch(|| Ok(HttpRequest::builder(HttpMethod::Get, ENDPOINT).build()?))
    }

    /// Deletes a contact list. The contacts themselves are kept.
    pub fn delete(&self, list_id: u64) -> C::Output {
        let path = build_path("api/v2/contactlist/{id}/deletelist/", &[("id", list_id)]);
        self.connection.dispatch(|| {
            Ok(HttpRequest::builder(HttpMethod::Post, path)
                .body(Map::new())
                .build()?)
        })
    }

    /// Adds contacts to an existing list.
    pub fn add_contacts<V: Serialize>(
        &self,
        list_id: u64,
        contact_ids: &[V],
        key_id: KeyId,
    ) -> C::Output {
        self.send_members("api/v2/contactlist/{id}/add/", list_id, contact_ids, key_id)
    }

    /// Removes contacts from a list without deleting them.
    pub fn remove_contacts<V: Serialize>(
        &self,
        list_id: u64,
        contact_ids: &[V],
        key_id: KeyId,
    ) -> C::Output {
        self.send_members("api/v2/contactlist/{id}/delete/", list_id, contact_ids, key_id)
    }

    fn send_members<V: Serialize>(
        &self,
        template: &str,
        list_id: u64,
        contact_ids: &[V],
        key_id: KeyId,
    ) -> C::Output {
        let path = build_path(template, &[("id", list_id)]);
        self.connection.dispatch(|| {
            let payload = object_payload(&ListMembers {
                key_id,
                external_ids: contact_ids,
            })?;
            Ok(HttpRequest::builder(HttpMethod::Post, path)
                .body(payload)
                .build()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::RecordingConnection;
    use serde_json::json;

    fn lists() -> ContactLists<RecordingConnection> {
        ContactLists::new(Arc::new(RecordingConnection))
    }

    #[test]
    fn test_create_with_defaults() {
        let request = lists()
            .create("squirrels", &ContactListParams::default())
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/contactlist/");
        assert_eq!(request.body, Some(json!({"name": "squirrels", "key_id": 3})));
    }

    #[test]
    fn test_create_with_contacts_and_description() {
        let params = ContactListParams {
            key_id: KeyId::Id,
            external_ids: Some(vec!["19739576".to_string()]),
            description: Some("Nut lovers".to_string()),
        };
        let request = lists().create("squirrels", &params).unwrap();

        assert_eq!(
            request.body,
            Some(json!({
                "name": "squirrels",
                "key_id": "id",
                "external_ids": ["19739576"],
                "description": "Nut lovers"
            }))
        );
    }

    #[test]
    fn test_add_contacts() {
        let request = lists()
            .add_contacts(42, &["a@b.c", "d@e.f"], KeyId::EMAIL)
            .unwrap();

        assert_eq!(request.path, "api/v2/contactlist/42/add/");
        assert_eq!(
            request.body,
            Some(json!({"key_id": 3, "external_ids": ["a@b.c", "d@e.f"]}))
        );
    }

    #[test]
    fn test_list() {
        let request = lists().list().unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "api/v2/contactlist/");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_delete_sends_empty_object() {
        let request = lists().delete(42).unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/contactlist/42/deletelist/");
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn test_remove_contacts() {
        let request = lists()
            .remove_contacts(42, &[19_739_576_u64], KeyId::Id)
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/contactlist/42/delete/");
        assert_eq!(
            request.body,
            Some(json!({"key_id": "id", "external_ids": [19_739_576]}))
        );
    }
}
