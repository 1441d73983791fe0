use async_trait::async_trait;

use crate::domain::{Post, PostDraft};
use crate::error::RepoError;

/// Post storage collaborator.
///
/// Updates are full-record replaces of the draft fields; the store assigns
/// ids and maintains the timestamps.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `created_at` first.
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError>;

    async fn create_post(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Replace the editable fields of an existing post.
    /// Returns `RepoError::NotFound` if the id is unknown.
    async fn update_post(&self, id: &str, draft: PostDraft) -> Result<Post, RepoError>;

    async fn delete_post(&self, id: &str) -> Result<(), RepoError>;

    /// Server-side equivalent of [`crate::search::filter_posts`].
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, RepoError>;
}

/// Category storage collaborator.
///
/// Renames and deletes cascade to posts referencing the category.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Unique, non-empty category names.
    async fn list_categories(&self) -> Result<Vec<String>, RepoError>;

    /// Returns `RepoError::Duplicate` when the name already exists.
    async fn create_category(&self, name: &str) -> Result<(), RepoError>;

    /// Rename a category and move every post carrying it to the new name.
    async fn rename_category(&self, old: &str, new: &str) -> Result<(), RepoError>;

    /// Delete a category and clear it from every post carrying it.
    async fn delete_category(&self, name: &str) -> Result<(), RepoError>;
}
