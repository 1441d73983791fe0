//! Editor preview and toolbar handlers.

use actix_web::{HttpResponse, web};

use quill_core::{editor, markup};
use quill_shared::dto::{PreviewRequest, PreviewResponse, WrapRequest, WrapResponse};

use crate::middleware::auth::AdminSession;

/// POST /api/editor/preview - Protected route
pub async fn preview(_admin: AdminSession, body: web::Json<PreviewRequest>) -> HttpResponse {
    let lines = markup::format(&body.content);
    let html = markup::render_html(&lines);
    HttpResponse::Ok().json(PreviewResponse { lines, html })
}

/// POST /api/editor/wrap - Protected route
pub async fn wrap(_admin: AdminSession, body: web::Json<WrapRequest>) -> HttpResponse {
    let req = body.into_inner();
    let edit = editor::wrap_selection(&req.text, req.selection_start, req.selection_end, req.style);
    HttpResponse::Ok().json(WrapResponse::from(edit))
}
