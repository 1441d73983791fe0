//! Post listing, detail and admin editing handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{CategoryPolicy, PostDraft};
use quill_core::error::DomainError;
use quill_core::markup;
use quill_shared::ApiResponse;
use quill_shared::dto::{PostDetailResponse, PostPayload, PostResponse};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Validate a submitted draft against the configured category policy.
async fn validated(state: &AppState, payload: PostPayload) -> AppResult<PostDraft> {
    let known = match state.category_policy {
        CategoryPolicy::Open => Vec::new(),
        CategoryPolicy::Closed(_) => state.categories.list_categories().await?,
    };
    Ok(PostDraft::from(payload).validate(&state.category_policy, &known)?)
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list_posts()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get_post(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: id.clone(),
        })?;

    let body = markup::format(&post.content);
    let body_html = markup::render_html(&body);
    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post.into(),
        body,
        body_html,
    }))
}

/// POST /api/posts - Protected route
pub async fn create_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let draft = validated(&state, body.into_inner()).await?;
    let post = state.posts.create_post(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        PostResponse::from(post),
        "Post created successfully",
    )))
}

/// PUT /api/posts/{id} - Protected route
pub async fn update_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let draft = validated(&state, body.into_inner()).await?;
    let post = state.posts.update_post(&path, draft).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostResponse::from(post),
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id} - Protected route
pub async fn delete_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully")))
}
