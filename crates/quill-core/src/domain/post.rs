use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryPolicy;
use crate::error::DomainError;

/// Author used when the editor leaves the field blank.
pub const DEFAULT_AUTHOR: &str = "DeepTech Research";

/// Post entity - a blog article.
///
/// `id` is assigned by the storage collaborator and never changes.
/// `updated_at` is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a post from a draft with storage-assigned id.
    pub fn new(id: impl Into<String>, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: draft.title,
            category: draft.category,
            excerpt: draft.excerpt,
            content: draft.content,
            author: draft.author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field and refresh `updated_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.category = draft.category;
        self.excerpt = draft.excerpt;
        self.content = draft.content;
        self.author = draft.author;
        self.touch(Utc::now());
    }

    /// Bump `updated_at`, clamped so it never precedes `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// The fields an editor submits: everything except id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub author: String,
}

impl PostDraft {
    /// Check the draft against the editor rules and normalize it.
    ///
    /// Title, excerpt and content are required. A blank author falls back to
    /// [`DEFAULT_AUTHOR`]; a blank category becomes `None`. `known` holds the
    /// categories managed in storage, which a closed policy also accepts.
    pub fn validate(
        mut self,
        policy: &CategoryPolicy,
        known: &[String],
    ) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.excerpt.trim().is_empty() {
            missing.push("excerpt");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.title = self.title.trim().to_string();
        self.author = match self.author.trim() {
            "" => DEFAULT_AUTHOR.to_string(),
            author => author.to_string(),
        };
        self.category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if let Some(category) = &self.category {
            if !policy.allows(category, known) {
                return Err(DomainError::Validation(format!(
                    "unknown category: {category}"
                )));
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "  Humanoid Robots  ".to_string(),
            category: Some("Robotics".to_string()),
            excerpt: "Fine motor control".to_string(),
            content: "Body".to_string(),
            author: String::new(),
        }
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let draft = draft()
            .validate(&CategoryPolicy::default(), &[])
            .unwrap();
        assert_eq!(draft.title, "Humanoid Robots");
        assert_eq!(draft.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let draft = PostDraft {
            title: " ".to_string(),
            content: String::new(),
            ..draft()
        };
        let err = draft
            .validate(&CategoryPolicy::Open, &[])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("content"));
        assert!(!msg.contains("excerpt"));
    }

    #[test]
    fn test_validate_rejects_unknown_closed_category() {
        let draft = PostDraft {
            category: Some("Astrology".to_string()),
            ..draft()
        };
        assert!(draft.clone().validate(&CategoryPolicy::default(), &[]).is_err());
        assert!(
            draft
                .clone()
                .validate(&CategoryPolicy::default(), &["Astrology".to_string()])
                .is_ok()
        );
        assert!(draft.validate(&CategoryPolicy::Open, &[]).is_ok());
    }

    #[test]
    fn test_blank_category_is_cleared() {
        let draft = PostDraft {
            category: Some("   ".to_string()),
            ..draft()
        };
        let draft = draft.validate(&CategoryPolicy::default(), &[]).unwrap();
        assert_eq!(draft.category, None);
    }

    #[test]
    fn test_apply_replaces_fields_and_keeps_timestamp_order() {
        let mut post = Post::new("1", draft());
        let created = post.created_at;

        let mut edit = draft();
        edit.title = "Updated".to_string();
        edit.category = None;
        post.apply(edit);

        assert_eq!(post.title, "Updated");
        assert_eq!(post.category, None);
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= post.created_at);

        post.touch(created - chrono::Duration::days(1));
        assert_eq!(post.updated_at, created);
    }
}
