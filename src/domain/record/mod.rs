//! Domain model for website records.
//!
//! Records arrive as schema-less JSON with a `type` discriminator. The store
//! persists them opaquely; in-process consumers work with the [`Record`] sum
//! type and pattern-match on the variant instead of probing for string fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A website record, discriminated by its `type` field.
///
/// `user` and `client` records share one shape; both names occur in stored
/// data, so both variants exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    #[serde(rename = "contact")]
    Contact(ContactRecord),
    #[serde(rename = "customer_count")]
    CustomerCount(CustomerCountRecord),
    #[serde(rename = "user")]
    User(ProfileRecord),
    #[serde(rename = "client")]
    Client(ProfileRecord),
    #[serde(rename = "technician")]
    Technician(TechnicianRecord),
}

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One per-visit marker record; the listing clients count these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerCountRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_at: Option<DateTime<Utc>>,
}

/// A signup profile (`user` or `client`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A technician application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicianRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Requested services; shape varies between forms (string or array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Best-effort typed view of a raw stored document. `None` when the
    /// document carries no recognized `type` or a shape the variant cannot
    /// absorb.
    pub fn from_doc(doc: &JsonValue) -> Option<Record> {
        serde_json::from_value(doc.clone()).ok()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Record::Contact(_) => "contact",
            Record::CustomerCount(_) => "customer_count",
            Record::User(_) => "user",
            Record::Client(_) => "client",
            Record::Technician(_) => "technician",
        }
    }
}

/// A record as it crosses the API boundary: the document's own fields plus
/// the store-assigned primary key as the `__backendId` string field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(rename = "__backendId")]
    pub backend_id: String,
    #[serde(flatten)]
    pub doc: JsonValue,
}

impl StoredRecord {
    /// Typed view of the underlying document, if it matches a known kind.
    pub fn record(&self) -> Option<Record> {
        Record::from_doc(&self.doc)
    }

    pub fn record_type(&self) -> Option<&str> {
        self.doc.get("type").and_then(JsonValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_doc_parses_to_variant() {
        let doc = json!({
            "type": "contact",
            "id": "rec_123",
            "name": "Jane",
            "email": "jane@x.com",
            "message": "Leaky faucet in unit 4B",
            "createdAt": "2024-05-01T12:00:00Z"
        });
        match Record::from_doc(&doc) {
            Some(Record::Contact(contact)) => {
                assert_eq!(contact.name.as_deref(), Some("Jane"));
                assert_eq!(contact.email.as_deref(), Some("jane@x.com"));
                assert!(contact.created_at.is_some());
            }
            other => panic!("expected contact variant, got {:?}", other),
        }
    }

    #[test]
    fn user_and_client_share_profile_shape() {
        let base = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@x.com",
            "propertyAddress": "1 Main St"
        });

        let mut user = base.clone();
        user["type"] = json!("user");
        let mut client = base;
        client["type"] = json!("client");

        assert!(matches!(Record::from_doc(&user), Some(Record::User(_))));
        assert!(matches!(Record::from_doc(&client), Some(Record::Client(_))));
    }

    #[test]
    fn unknown_type_yields_none() {
        assert!(Record::from_doc(&json!({"type": "invoice"})).is_none());
        assert!(Record::from_doc(&json!({"name": "no type at all"})).is_none());
    }

    #[test]
    fn missing_optional_fields_are_fine() {
        // The forms submit sparse documents; every field is optional.
        let doc = json!({"type": "technician"});
        assert!(matches!(
            Record::from_doc(&doc),
            Some(Record::Technician(_))
        ));
    }

    #[test]
    fn stored_record_flattens_backend_id_into_the_document() {
        let stored = StoredRecord {
            backend_id: "b2f7a9a0-0000-0000-0000-000000000000".to_string(),
            doc: json!({"type": "contact", "name": "Jane"}),
        };
        let wire = serde_json::to_value(&stored).unwrap();
        assert_eq!(wire["__backendId"], json!(stored.backend_id));
        assert_eq!(wire["name"], json!("Jane"));

        let back: StoredRecord = serde_json::from_value(wire).unwrap();
        assert_eq!(back, stored);
        assert_eq!(back.record_type(), Some("contact"));
    }
}
