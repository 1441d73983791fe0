//! In-memory post and category store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, PostRepository};
use quill_core::search::retain_matching;

use crate::seed::sample_posts;

/// Posts and categories held in process memory.
///
/// Implements both storage ports, including the category cascades, so the
/// server behaves the same with or without a hosted data API.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogStore {
    posts: RwLock<Vec<Post>>,
    categories: RwLock<Vec<String>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::with_posts(Vec::new(), Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>, categories: Vec<String>) -> Self {
        Self {
            posts: RwLock::new(posts),
            categories: RwLock::new(categories),
        }
    }

    /// A store holding the bundled sample posts and their categories.
    pub fn seeded() -> Self {
        let posts = sample_posts();
        let mut categories: Vec<String> = Vec::new();
        for category in posts.iter().filter_map(|p| p.category.clone()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Self::with_posts(posts, categories)
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let post = Post::new(Uuid::new_v4().to_string(), draft);
        self.posts.write().await.push(post.clone());
        tracing::debug!(post_id = %post.id, "Post created in memory");
        Ok(post)
    }

    async fn update_post(&self, id: &str, draft: PostDraft) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply(draft);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let posts = self.list_posts().await?;
        Ok(retain_matching(term, posts))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlogStore {
    async fn list_categories(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.categories.read().await.clone())
    }

    async fn create_category(&self, name: &str) -> Result<(), RepoError> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c == name) {
            return Err(RepoError::Duplicate(format!("category {name} already exists")));
        }
        categories.push(name.to_string());
        Ok(())
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<(), RepoError> {
        // Lock order: categories, then posts.
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c == new) {
            return Err(RepoError::Duplicate(format!("category {new} already exists")));
        }
        let slot = categories
            .iter_mut()
            .find(|c| c.as_str() == old)
            .ok_or(RepoError::NotFound)?;
        *slot = new.to_string();

        let now = Utc::now();
        let mut posts = self.posts.write().await;
        for post in posts
            .iter_mut()
            .filter(|p| p.category.as_deref() == Some(old))
        {
            post.category = Some(new.to_string());
            post.touch(now);
        }
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<(), RepoError> {
        let mut categories = self.categories.write().await;
        let before = categories.len();
        categories.retain(|c| c != name);
        if categories.len() == before {
            return Err(RepoError::NotFound);
        }

        let now = Utc::now();
        let mut posts = self.posts.write().await;
        for post in posts
            .iter_mut()
            .filter(|p| p.category.as_deref() == Some(name))
        {
            post.category = None;
            post.touch(now);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, category: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            category: Some(category.to_string()),
            excerpt: "excerpt".to_string(),
            content: "content".to_string(),
            author: "author".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = InMemoryBlogStore::new();
        let post = store.create_post(draft("First", "AI")).await.unwrap();

        let found = store.get_post(&post.id).await.unwrap().unwrap();
        assert_eq!(found.title, "First");

        let updated = store
            .update_post(&post.id, draft("Second", "Robotics"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Second");
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at >= post.updated_at);

        store.delete_post(&post.id).await.unwrap();
        assert!(store.get_post(&post.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_post(&post.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_post_is_not_found() {
        let store = InMemoryBlogStore::new();
        let result = store.update_post("missing", draft("x", "AI")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryBlogStore::seeded();
        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.first().map(|p| p.id.as_str()), Some("1"));
        assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_search_uses_matcher_semantics() {
        let store = InMemoryBlogStore::seeded();
        assert!(store.search_posts("").await.unwrap().is_empty());
        let found = store.search_posts("QUANTUM").await.unwrap();
        assert!(found.iter().all(|p| {
            let hay = format!("{} {} {}", p.title, p.content, p.excerpt).to_lowercase();
            hay.contains("quantum") || p.category.as_deref() == Some("Quantum Computing")
        }));
        assert!(!found.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_category_rejected() {
        let store = InMemoryBlogStore::seeded();
        assert!(matches!(
            store.create_category("AI").await,
            Err(RepoError::Duplicate(_))
        ));
        store.create_category("Space").await.unwrap();
        assert!(store.list_categories().await.unwrap().contains(&"Space".to_string()));
    }

    #[tokio::test]
    async fn test_rename_category_cascades_to_posts() {
        let store = InMemoryBlogStore::seeded();
        store
            .rename_category("AI", "Artificial Intelligence")
            .await
            .unwrap();

        let posts = store.list_posts().await.unwrap();
        assert!(posts.iter().all(|p| p.category.as_deref() != Some("AI")));
        assert_eq!(
            posts
                .iter()
                .filter(|p| p.category.as_deref() == Some("Artificial Intelligence"))
                .count(),
            2
        );
        assert!(matches!(
            store.rename_category("AI", "Other").await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            store.rename_category("Robotics", "Neurology").await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_category_clears_posts() {
        let store = InMemoryBlogStore::seeded();
        store.delete_category("Robotics").await.unwrap();

        let robot = store.get_post("2").await.unwrap().unwrap();
        assert_eq!(robot.category, None);
        assert!(robot.updated_at >= robot.created_at);
        assert!(!store.list_categories().await.unwrap().contains(&"Robotics".to_string()));
    }
}
