//! Contact fields resource.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::{build_path, object_payload, ApiResource, KeyId};
use crate::clients::{Connection, HttpMethod, HttpRequest};

const NAME: &str = "contact_fields";
const ENDPOINT: &str = "api/v2/field/";

/// The data type of a contact field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Up to 60 characters.
    ShortText,
    /// Up to 255 characters.
    LongText,
    /// Text of any length.
    LargeText,
    /// A date.
    Date,
    /// A URL.
    Url,
    /// A number of up to 24 digits.
    Numeric,
}

impl FieldType {
    /// Returns the `application_type` value sent to the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "shorttext",
            Self::LongText => "longtext",
            Self::LargeText => "largetext",
            Self::Date => "date",
            Self::Url => "url",
            Self::Numeric => "numeric",
        }
    }

    /// Returns the largest value the field holds: characters for text
    /// fields, digits for numeric ones. `None` means no fixed limit.
    #[must_use]
    pub const fn max_length(&self) -> Option<u32> {
        match self {
            Self::ShortText => Some(60),
            Self::LongText => Some(255),
            Self::Numeric => Some(24),
            Self::LargeText | Self::Date | Self::Url => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct NewField<'a> {
    name: &'a str,
    application_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    string_id: Option<&'a str>,
}

/// Operations on contact fields.
#[derive(Debug)]
pub struct ContactFields<C> {
    connection: Arc<C>,
}

impl<C: Connection> ApiResource for ContactFields<C> {
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

impl<C: Connection> ContactFields<C> {
    /// Creates a custom contact field.
    pub fn create(&self, name: &str, field_type: FieldType, string_id: Option<&str>) -> C::Output {
        self.connection.dispatch(|| {
            let payload = object_payload(&NewField {
                name,
                application_type: field_type,
                string_id,
            })?;
            Ok(HttpRequest::builder(HttpMethod::Post, ENDPOINT)
                .body(payload)
                .build()?)
        })
    }

    /// Deletes a custom contact field.
    ///
    /// `field` identifies the field, e.g. `{"id": 4242}`.
    pub fn delete<T>(&self, field: &T) -> C::Output
    where
        T: Serialize + ?Sized,
    {
        self.connection.dispatch(|| {
            let payload = object_payload(field)?;
            Ok(HttpRequest::builder(HttpMethod::Post, format!("{ENDPOINT}delete/"))
                .body(payload)
                .build()?)
        })
    }

    /// Lists all contact fields, with names translated to `language` if
    /// given.
    pub fn list(&self, language: Option<&str>) -> C::Output {
        let path = language.map_or_else(
            || ENDPOINT.to_string(),
            |language| build_path("api/v2/field/translate/{language}", &[("language", language)]),
        );
        self.connection
            .dispatch(|| Ok(HttpRequest::builder(HttpMethod::Get, path).build()?))
    }

    /// Lists the choices of a single- or multiple-choice field.
    pub fn list_choice(&self, field_id: u32, language: Option<&str>) -> C::Output {
        let mut path = build_path("api/v2/field/{id}/choice", &[("id", field_id)]);
        if let Some(language) = language {
            path.push_str(&build_path("/translate/{language}", &[("language", language)]));
        }
        self.connection
            .dispatch(|| Ok(HttpRequest::builder(HttpMethod::Get, path).build()?))
    }

    /// Returns when `field_id` of a contact last changed.
    pub fn last_change(&self, key_id: KeyId, key_value: &str, field_id: u32) -> C::Output {
        self.connection.dispatch(|| {
            Ok(
                HttpRequest::builder(HttpMethod::Get, "api/v2/contact/last_change/")
                    .query_param("key_id", key_id.to_string())
                    .query_param("key_value", key_value)
                    .query_param("field_id", field_id.to_string())
                    .build()?,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, InvalidCallError};
    use crate::resources::testing::RecordingConnection;
    use serde_json::json;

    fn fields() -> ContactFields<RecordingConnection> {
        ContactFields::new(Arc::new(RecordingConnection))
    }

    #[test]
    fn test_field_type_wire_values() {
        assert_eq!(FieldType::ShortText.as_str(), "shorttext");
        assert_eq!(FieldType::LargeText.to_string(), "largetext");
        assert_eq!(
            serde_json::to_value(FieldType::Numeric).unwrap(),
            json!("numeric")
        );
        assert_eq!(
            serde_json::to_value(FieldType::LongText).unwrap(),
            json!("longtext")
        );
    }

    #[test]
    fn test_field_type_limits() {
        assert_eq!(FieldType::ShortText.max_length(), Some(60));
        assert_eq!(FieldType::LongText.max_length(), Some(255));
        assert_eq!(FieldType::Numeric.max_length(), Some(24));
        assert_eq!(FieldType::LargeText.max_length(), None);
        assert_eq!(FieldType::Date.max_length(), None);
    }

    #[test]
    fn test_create() {
        let request = fields()
            .create("favourite nut", FieldType::ShortText, None)
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/field/");
        assert_eq!(
            request.body,
            Some(json!({"name": "favourite nut", "application_type": "shorttext"}))
        );
    }

    #[test]
    fn test_create_with_string_id() {
        let request = fields()
            .create("birthday", FieldType::Date, Some("bday"))
            .unwrap();

        assert_eq!(
            request.body,
            Some(json!({"name": "birthday", "application_type": "date", "string_id": "bday"}))
        );
    }

    #[test]
    fn test_delete() {
        let request = fields().delete(&json!({"id": 4242})).unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "api/v2/field/delete/");
        assert_eq!(request.body, Some(json!({"id": 4242})));
    }

    #[test]
    fn test_delete_rejects_non_object() {
        let error = fields().delete(&4242).unwrap_err();

        assert!(matches!(
            error,
            HttpError::InvalidCall(InvalidCallError::PayloadNotObject { found: "number" })
        ));
    }

    #[test]
    fn test_list() {
        let request = fields().list(None).unwrap();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "api/v2/field/");
        assert!(request.body.is_none());

        let request = fields().list(Some("fr")).unwrap();
        assert_eq!(request.path, "api/v2/field/translate/fr");
    }

    #[test]
    fn test_list_choice() {
        let request = fields().list_choice(5, None).unwrap();
        assert_eq!(request.path, "api/v2/field/5/choice");

        let request = fields().list_choice(5, Some("de")).unwrap();
        assert_eq!(request.path, "api/v2/field/5/choice/translate/de");
    }

    #[test]
    fn test_list_encodes_language() {
        let request = fields().list(Some("../contact")).unwrap();
        assert_eq!(request.path, "api/v2/field/translate/..%2Fcontact");
    }

    #[test]
    fn test_last_change() {
        let request = fields()
            .last_change(KeyId::EMAIL, "a@b.c", 1)
            .unwrap();

        assert_eq!(request.path, "api/v2/contact/last_change/");
        let query = request.query.unwrap();
        assert_eq!(query.get("key_id"), Some(&"3".to_string()));
        assert_eq!(query.get("key_value"), Some(&"a@b.c".to_string()));
        assert_eq!(query.get("field_id"), Some(&"1".to_string()));
    }
}
