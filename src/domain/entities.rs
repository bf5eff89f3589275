//! Domain entities mirrored from the upstream blog API.

use blogdesk_api_types::BlogRecordPayload;
use serde::Serialize;

use crate::domain::types::BlogStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: BlogStatus,
}

impl From<BlogRecordPayload> for BlogRecord {
    fn from(payload: BlogRecordPayload) -> Self {
        Self {
            status: BlogStatus::parse(&payload.status),
            id: payload.id,
            title: payload.title,
            slug: payload.slug,
        }
    }
}

impl BlogRecord {
    /// Case-insensitive substring match on the title. An empty needle matches.
    pub fn title_contains(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.title.to_lowercase().contains(needle_lowercase)
    }
}
