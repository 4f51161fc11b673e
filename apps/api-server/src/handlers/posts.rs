//! Post handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;

use blogfeed_core::access::{Operation, authorize};
use blogfeed_core::error::DomainError;
use blogfeed_shared::dto::{EditPostFormResponse, PostFormResponse, PostListResponse};

use super::upload::read_post_form;
use super::views;
use crate::middleware::auth::RequestCaller;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category_id: Option<String>,
}

impl ListQuery {
    /// An empty `categoryId` means "all categories".
    fn category_filter(&self) -> AppResult<Option<i32>> {
        match self.category_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest("categoryId must be an integer".to_string())),
        }
    }
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    caller: RequestCaller,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let selected = query.category_filter()?;
    let listing = state.posts.list(&caller.0, selected).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: listing.posts.into_iter().map(views::post_summary).collect(),
        categories: listing.categories.into_iter().map(views::category).collect(),
        selected_category_id: selected,
    }))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.detail(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::post_detail(detail)))
}

/// GET /api/posts/new - Admin only
pub async fn new_form(state: web::Data<AppState>, caller: RequestCaller) -> AppResult<HttpResponse> {
    let categories = state.posts.new_form(&caller.0).await?;
    Ok(HttpResponse::Ok().json(PostFormResponse {
        categories: views::category_options(categories, None),
    }))
}

/// POST /api/posts (multipart) - Admin only
pub async fn create(
    state: web::Data<AppState>,
    caller: RequestCaller,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    // Gate before buffering the upload.
    authorize(Operation::CreatePost, &caller.0).map_err(DomainError::from)?;

    let form = read_post_form(payload, state.max_upload_bytes).await?;
    let post = state.posts.create(&caller.0, form.input, form.image).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/posts/{}", post.id)))
        .json(views::post(post, None)))
}

/// GET /api/posts/{id}/edit - Admin only
pub async fn edit_form(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let form = state.posts.edit_form(&caller.0, path.into_inner()).await?;
    let selected = Some(form.post.category_id);

    Ok(HttpResponse::Ok().json(EditPostFormResponse {
        post: views::post(form.post, None),
        categories: views::category_options(form.categories, selected),
    }))
}

/// PUT /api/posts/{id} (multipart) - Admin only
pub async fn update(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    authorize(Operation::EditPost, &caller.0).map_err(DomainError::from)?;

    let form = read_post_form(payload, state.max_upload_bytes).await?;
    let post = state
        .posts
        .update(&caller.0, path.into_inner(), form.input, form.image)
        .await?;

    Ok(HttpResponse::Ok().json(views::post(post, None)))
}

/// GET /api/posts/{id}/delete - Admin only
pub async fn delete_confirmation(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let item = state
        .posts
        .delete_confirmation(&caller.0, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(views::post(item.post, Some(item.category.name))))
}

/// DELETE /api/posts/{id} - Admin only
pub async fn delete(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
