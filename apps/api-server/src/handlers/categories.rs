//! Category handlers. Every route here is admin only.

use actix_web::{HttpResponse, http::header, web};

use blogfeed_core::access::{Operation, authorize};
use blogfeed_core::domain::CategoryInput;
use blogfeed_core::error::DomainError;
use blogfeed_shared::dto::{CategoryRequest, CategoryResponse};

use super::{json_body, views};
use crate::middleware::auth::RequestCaller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn category_input(req: CategoryRequest) -> CategoryInput {
    CategoryInput::new(req.name, req.description)
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>, caller: RequestCaller) -> AppResult<HttpResponse> {
    let categories: Vec<CategoryResponse> = state
        .categories
        .list(&caller.0)
        .await?
        .into_iter()
        .map(views::category)
        .collect();

    Ok(HttpResponse::Ok().json(categories))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    caller: RequestCaller,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorize(Operation::CreateCategory, &caller.0).map_err(DomainError::from)?;

    let req: CategoryRequest = json_body(&body)?;
    let category = state
        .categories
        .create(&caller.0, category_input(req))
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/categories/{}", category.id)))
        .json(views::category(category)))
}

/// GET /api/categories/{id}
pub async fn get(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::category(category)))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorize(Operation::UpdateCategory, &caller.0).map_err(DomainError::from)?;

    let req: CategoryRequest = json_body(&body)?;
    let category = state
        .categories
        .update(&caller.0, path.into_inner(), category_input(req))
        .await?;

    Ok(HttpResponse::Ok().json(views::category(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.categories.delete(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
