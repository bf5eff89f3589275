//! Request and response shapes shared with the external blog API.
//!
//! The blog API is document-store backed, so record identifiers arrive as
//! `_id`. Plain `id` is accepted as well.

use serde::{Deserialize, Deserializer, Serialize};

/// A single blog record as returned by the collection endpoint.
///
/// Only the identifier is required. Missing or `null` text fields decode as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecordPayload {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Body of the session endpoint. An empty object means "no session".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub user: Option<SessionUserPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_document_store_identifier() {
        let record: BlogRecordPayload = serde_json::from_str(
            r#"{"_id":"65f1","title":"Hello","slug":"hello","status":"publish","extra":1}"#,
        )
        .expect("record");
        assert_eq!(record.id, "65f1");
        assert_eq!(record.status, "publish");
    }

    #[test]
    fn record_accepts_plain_identifier_and_missing_fields() {
        let record: BlogRecordPayload =
            serde_json::from_str(r#"{"id":"7","title":"Bare"}"#).expect("record");
        assert_eq!(record.id, "7");
        assert!(record.slug.is_empty());
        assert!(record.status.is_empty());
    }

    #[test]
    fn untitled_or_null_status_drafts_still_decode() {
        let records: Vec<BlogRecordPayload> = serde_json::from_str(
            r#"[{"_id":"1","title":"Live","slug":"live","status":"publish"},
                {"_id":"2","status":"draft"},
                {"_id":"3","title":null,"slug":null,"status":null}]"#,
        )
        .expect("records");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Live");
        assert!(records[1].title.is_empty());
        assert!(records[2].status.is_empty());
    }

    #[test]
    fn empty_session_object_has_no_user() {
        let session: SessionPayload = serde_json::from_str("{}").expect("session");
        assert_eq!(session.user, None);

        let session: SessionPayload = serde_json::from_str(
            r#"{"user":{"name":"Ada","email":"ada@example.com","image":null},"expires":"2030-01-01T00:00:00Z"}"#,
        )
        .expect("session");
        assert_eq!(
            session.user.and_then(|user| user.email).as_deref(),
            Some("ada@example.com")
        );
    }
}
