//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::archive::{MonthGroup, YearGroup};
use quill_core::domain::{CategoryPolicy, Post, PostDraft};
use quill_core::editor::Edit;
use quill_core::markup::{Line, Style};

/// Editor form submission for creating or replacing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl From<PostPayload> for PostDraft {
    fn from(payload: PostPayload) -> Self {
        PostDraft {
            title: payload.title,
            category: payload.category,
            excerpt: payload.excerpt,
            content: payload.content,
            author: payload.author.unwrap_or_default(),
        }
    }
}

/// A post as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            category: post.category,
            excerpt: post.excerpt,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// A single post with its body already formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub body: Vec<Line>,
    /// Escaped HTML rendering of `body`.
    pub body_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<PostResponse>,
}

/// Request to log in with the admin credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Whether the caller holds a live admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
    pub policy: CategoryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub lines: Vec<Line>,
    pub html: String,
}

/// Toolbar action on the editor's content field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapRequest {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub style: Style,
}

/// Content and selection after a toolbar action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapResponse {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl From<Edit> for WrapResponse {
    fn from(edit: Edit) -> Self {
        Self {
            text: edit.text,
            selection_start: edit.selection_start,
            selection_end: edit.selection_end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveYear {
    pub year: i32,
    pub months: Vec<ArchiveMonth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveMonth {
    pub month: u32,
    pub name: String,
    pub posts: Vec<PostResponse>,
}

impl From<YearGroup> for ArchiveYear {
    fn from(group: YearGroup) -> Self {
        Self {
            year: group.year,
            months: group.months.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<MonthGroup> for ArchiveMonth {
    fn from(group: MonthGroup) -> Self {
        Self {
            month: group.month,
            name: group.name,
            posts: group.posts.into_iter().map(Into::into).collect(),
        }
    }
}
