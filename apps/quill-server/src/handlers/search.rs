//! Search endpoint.

use actix_web::{HttpResponse, web};

use quill_core::search::retain_matching;
use quill_shared::dto::{SearchParams, SearchResponse};

use crate::config::SearchMode;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/search?q=
///
/// An empty query matches nothing.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let query = params.into_inner().q;

    let results = match state.search_mode {
        SearchMode::Remote => state.posts.search_posts(&query).await?,
        SearchMode::Local if query.is_empty() => Vec::new(),
        SearchMode::Local => retain_matching(&query, state.posts.list_posts().await?),
    };
    tracing::debug!(query = %query, hits = results.len(), "Search served");

    Ok(HttpResponse::Ok().json(SearchResponse {
        query,
        results: results.into_iter().map(Into::into).collect(),
    }))
}
