//! Query matcher - live filtering of posts by free text.

use crate::domain::Post;

/// Posts whose title, content, excerpt or category contains `query`,
/// ignoring case, in their original order.
///
/// An empty query matches nothing: the search box asks the user to start
/// typing instead of echoing the whole list. Author is not searched.
pub fn filter_posts<'a>(query: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    posts.iter().filter(|post| matches(post, &needle)).collect()
}

/// Owned variant of [`filter_posts`] for results fetched by value.
pub fn retain_matching(query: &str, posts: Vec<Post>) -> Vec<Post> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    posts
        .into_iter()
        .filter(|post| matches(post, &needle))
        .collect()
}

/// `needle` must already be lowercase.
fn matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post
            .category
            .as_deref()
            .is_some_and(|category| category.to_lowercase().contains(needle))
}
