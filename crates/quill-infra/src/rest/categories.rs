//! `CategoryRepository` over the `categories` table, with cascades into `posts`.

use async_trait::async_trait;
use chrono::Utc;

use quill_core::error::RepoError;
use quill_core::ports::CategoryRepository;

use super::client::DataApiClient;
use super::posts::POSTS;
use super::rows::{CategoryPatch, CategoryRow, PostRow};

const CATEGORIES: &str = "categories";

pub struct RestCategoryRepository {
    client: DataApiClient,
}

impl RestCategoryRepository {
    pub fn new(client: DataApiClient) -> Self {
        Self { client }
    }

    fn name_eq(name: &str) -> [(&'static str, String); 1] {
        [("name", format!("eq.{name}"))]
    }

    /// Point every post filed under `old` at `new` (or at nothing).
    async fn reassign_posts(&self, old: &str, new: Option<&str>) -> Result<usize, RepoError> {
        let patch = CategoryPatch {
            category: new,
            updated_at: Utc::now(),
        };
        let rows: Vec<PostRow> = self
            .client
            .update(POSTS, &[("category", format!("eq.{old}"))], &patch)
            .await?;
        Ok(rows.len())
    }
}

#[async_trait]
impl CategoryRepository for RestCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<String>, RepoError> {
        let rows: Vec<CategoryRow> = self
            .client
            .select(CATEGORIES, &[("select", "name".to_string())])
            .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }

    async fn create_category(&self, name: &str) -> Result<(), RepoError> {
        let _: Vec<CategoryRow> = self
            .client
            .insert(
                CATEGORIES,
                &CategoryRow {
                    name: name.to_string(),
                },
            )
            .await?;
        tracing::info!(category = %name, "Category created");
        Ok(())
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<(), RepoError> {
        let taken: Vec<CategoryRow> = self
            .client
            .select(CATEGORIES, &Self::name_eq(new))
            .await?;
        if !taken.is_empty() {
            return Err(RepoError::Duplicate(format!("category {new} already exists")));
        }

        let renamed: Vec<CategoryRow> = self
            .client
            .update(
                CATEGORIES,
                &Self::name_eq(old),
                &CategoryRow {
                    name: new.to_string(),
                },
            )
            .await?;
        if renamed.is_empty() {
            return Err(RepoError::NotFound);
        }

        let moved = self.reassign_posts(old, Some(new)).await.inspect_err(|e| {
            tracing::error!(old = %old, new = %new, error = %e, "Category renamed but posts still reference the old name");
        })?;
        tracing::info!(old = %old, new = %new, posts = moved, "Category renamed");
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<(), RepoError> {
        let deleted: Vec<CategoryRow> = self
            .client
            .remove(CATEGORIES, &Self::name_eq(name))
            .await?;
        if deleted.is_empty() {
            return Err(RepoError::NotFound);
        }

        let cleared = self.reassign_posts(name, None).await.inspect_err(|e| {
            tracing::error!(category = %name, error = %e, "Category deleted but posts still reference it");
        })?;
        tracing::info!(category = %name, posts = cleared, "Category deleted");
        Ok(())
    }
}
