//! `PostRepository` over the data API's `posts` table.

use async_trait::async_trait;
use chrono::Utc;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use quill_core::search::retain_matching;

use super::client::DataApiClient;
use super::rows::{PostRow, PostWrite};

pub(crate) const POSTS: &str = "posts";

/// Columns the search filter looks at. Author is not searched.
const SEARCH_COLUMNS: [&str; 4] = ["title", "content", "excerpt", "category"];

pub struct RestPostRepository {
    client: DataApiClient,
}

impl RestPostRepository {
    pub fn new(client: DataApiClient) -> Self {
        Self { client }
    }

    /// Insert a post keeping its timestamps. Used to seed a fresh project.
    pub async fn import_post(&self, post: &Post) -> Result<Post, RepoError> {
        let rows: Vec<PostRow> = self
            .client
            .insert(POSTS, &PostWrite::from_post(post))
            .await?;
        first(rows)
    }
}

fn first(rows: Vec<PostRow>) -> Result<Post, RepoError> {
    rows.into_iter()
        .next()
        .ok_or(RepoError::NotFound)
        .and_then(Post::try_from)
}

fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, RepoError> {
    rows.into_iter().map(Post::try_from).collect()
}

/// `or=(...)` filter matching `term` anywhere in the searchable columns.
///
/// The server match is only a prefilter; `retain_matching` decides the
/// final result set, so wildcard characters in the term are harmless.
pub(crate) fn search_filter(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    let clauses: Vec<String> = SEARCH_COLUMNS
        .iter()
        .map(|column| format!("{column}.ilike.\"*{escaped}*\""))
        .collect();
    format!("({})", clauses.join(","))
}

pub(crate) fn id_eq(id: &str) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

#[async_trait]
impl PostRepository for RestPostRepository {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self
            .client
            .select(
                POSTS,
                &[
                    ("select", "*".to_string()),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        into_posts(rows)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let rows: Vec<PostRow> = self
            .client
            .select(POSTS, &[id_eq(id), ("select", "*".to_string())])
            .await?;
        rows.into_iter().next().map(Post::try_from).transpose()
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let rows: Vec<PostRow> = self
            .client
            .insert(POSTS, &PostWrite::from_draft(&draft, now))
            .await?;
        let post = first(rows)?;
        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: &str, draft: PostDraft) -> Result<Post, RepoError> {
        let now = Utc::now();
        let rows: Vec<PostRow> = self
            .client
            .update(POSTS, &[id_eq(id)], &PostWrite::from_draft(&draft, now))
            .await?;
        let post = first(rows)?;
        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), RepoError> {
        let rows: Vec<PostRow> = self.client.remove(POSTS, &[id_eq(id)]).await?;
        if rows.is_empty() {
            return Err(RepoError::NotFound);
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .client
            .select(
                POSTS,
                &[
                    ("select", "*".to_string()),
                    ("or", search_filter(term)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(retain_matching(term, into_posts(rows)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_quotes_and_escapes() {
        assert_eq!(
            search_filter("gpt-5"),
            "(title.ilike.\"*gpt-5*\",content.ilike.\"*gpt-5*\",\
             excerpt.ilike.\"*gpt-5*\",category.ilike.\"*gpt-5*\")"
        );
        assert!(search_filter("a,b (c)").contains("title.ilike.\"*a,b (c)*\""));
        assert!(search_filter("say \"hi\"").contains("\"*say \\\"hi\\\"*\""));
    }
}
