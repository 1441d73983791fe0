//! Wire shapes of the `posts` and `categories` tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;

/// A row of the `posts` table as the data API returns it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<PostRow> for Post {
    type Error = RepoError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&row.created_at)?;
        let updated_at = match row.updated_at.as_deref() {
            Some(raw) => parse_timestamp(raw)?.max(created_at),
            None => created_at,
        };
        Ok(Post {
            id: row.id,
            title: row.title,
            category: row.category.filter(|c| !c.trim().is_empty()),
            excerpt: row.excerpt.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
            author: row.author.unwrap_or_default(),
            created_at,
            updated_at,
        })
    }
}

/// Body of an insert or full update. Ids are left to storage.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostWrite<'a> {
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PostWrite<'a> {
    pub fn from_draft(draft: &'a PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: &draft.title,
            category: draft.category.as_deref(),
            excerpt: &draft.excerpt,
            content: &draft.content,
            author: &draft.author,
            created_at: None,
            updated_at: now,
        }
    }

    /// Insert body that keeps the post's own timestamps.
    pub fn from_post(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            category: post.category.as_deref(),
            excerpt: &post.excerpt,
            content: &post.content,
            author: &post.author,
            created_at: Some(post.created_at),
            updated_at: post.updated_at,
        }
    }
}

/// Partial update that reassigns a post's category.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CategoryPatch<'a> {
    pub category: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryRow {
    pub name: String,
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Accepts RFC 3339, a zone-less timestamp (read as UTC), or a bare date.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
        .ok_or_else(|| RepoError::Decode(format!("unrecognized timestamp {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(value: serde_json::Value) -> PostRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_and_text_ids() {
        let numeric = row(serde_json::json!({
            "id": 42, "title": "T", "created_at": "2025-01-15"
        }));
        assert_eq!(numeric.id, "42");
        let text = row(serde_json::json!({
            "id": "abc", "title": "T", "created_at": "2025-01-15"
        }));
        assert_eq!(text.id, "abc");
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-01-15T10:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-01-15T10:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-01-15 10:30:00.000").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025-01-15").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
        );
        assert!(matches!(parse_timestamp("yesterday"), Err(RepoError::Decode(_))));
    }

    #[test]
    fn test_missing_fields_and_clamped_update_time() {
        let post = Post::try_from(row(serde_json::json!({
            "id": 1,
            "title": "T",
            "category": "",
            "created_at": "2025-01-15T00:00:00Z",
            "updated_at": "2024-12-01T00:00:00Z"
        })))
        .unwrap();
        assert_eq!(post.category, None);
        assert_eq!(post.excerpt, "");
        assert_eq!(post.updated_at, post.created_at);
    }

    #[test]
    fn test_write_omits_created_at_for_drafts() {
        let draft = PostDraft {
            title: "T".into(),
            ..PostDraft::default()
        };
        let body = serde_json::to_value(PostWrite::from_draft(&draft, Utc::now())).unwrap();
        assert!(body.get("created_at").is_none());
        assert!(body.get("id").is_none());
        assert!(body["category"].is_null());
    }
}
