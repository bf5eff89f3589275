//! Shared domain enumerations aligned with the upstream blog API.

use serde::{Deserialize, Serialize};

/// Publication status as reported by the blog API.
///
/// The API writes `publish`; `published` is accepted as a synonym. Any other
/// value maps to [`BlogStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogStatus {
    Draft,
    #[serde(alias = "published")]
    Publish,
    #[serde(other)]
    Unknown,
}

impl BlogStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "draft" => BlogStatus::Draft,
            "publish" | "published" => BlogStatus::Publish,
            _ => BlogStatus::Unknown,
        }
    }

    pub fn is_published(self) -> bool {
        matches!(self, BlogStatus::Publish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact_and_case_sensitive() {
        assert_eq!(BlogStatus::parse("publish"), BlogStatus::Publish);
        assert_eq!(BlogStatus::parse("published"), BlogStatus::Publish);
        assert_eq!(BlogStatus::parse("draft"), BlogStatus::Draft);
        assert_eq!(BlogStatus::parse("Publish"), BlogStatus::Unknown);
        assert_eq!(BlogStatus::parse(""), BlogStatus::Unknown);
    }

    #[test]
    fn serde_tolerates_unknown_values() {
        let status: BlogStatus = serde_json::from_str("\"archived\"").expect("status");
        assert_eq!(status, BlogStatus::Unknown);
        let status: BlogStatus = serde_json::from_str("\"published\"").expect("status");
        assert!(status.is_published());
    }
}
