//! Category listing and admin management handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::normalize_category_name;
use quill_shared::ApiResponse;
use quill_shared::dto::{CategoryListResponse, CategoryRequest};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_categories().await?;
    Ok(HttpResponse::Ok().json(CategoryListResponse {
        categories,
        policy: state.category_policy.clone(),
    }))
}

/// POST /api/categories - Protected route
pub async fn create_category(
    state: web::Data<AppState>,
    _admin: AdminSession,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let name = normalize_category_name(&body.name)?;
    state.categories.create_category(&name).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        name,
        "Category added successfully",
    )))
}

/// PUT /api/categories/{name} - Protected route
///
/// Posts filed under the old name move to the new one.
pub async fn rename_category(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<String>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let old = path.into_inner();
    let new = normalize_category_name(&body.name)?;
    if new == old {
        return Err(AppError::BadRequest(
            "The new category name must differ from the old one".to_string(),
        ));
    }
    state.categories.rename_category(&old, &new).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        new,
        "Category updated successfully",
    )))
}

/// DELETE /api/categories/{name} - Protected route
///
/// Posts filed under the name keep existing with no category.
pub async fn delete_category(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.categories.delete_category(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted successfully")))
}
