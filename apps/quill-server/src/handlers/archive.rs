//! Admin dashboard archive.

use actix_web::{HttpResponse, web};

use quill_core::archive::group_by_month;
use quill_shared::dto::ArchiveYear;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/archive - Protected route
pub async fn archive(
    state: web::Data<AppState>,
    _admin: AdminSession,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_posts().await?;
    let years: Vec<ArchiveYear> = group_by_month(&posts).into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(years))
}
