//! Comment handlers.

use actix_web::{HttpResponse, web};

use blogfeed_core::access::{Operation, authorize};
use blogfeed_core::domain::CommentInput;
use blogfeed_core::error::DomainError;
use blogfeed_shared::dto::CommentRequest;

use super::{json_body, views};
use crate::middleware::auth::RequestCaller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/comments - Any signed-in user
///
/// The comment date is always the server's clock.
pub async fn add(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorize(Operation::AddComment, &caller.0).map_err(DomainError::from)?;

    let req: CommentRequest = json_body(&body)?;
    let comment = state
        .comments
        .add(
            &caller.0,
            path.into_inner(),
            CommentInput::new(req.user_name, req.comment_content),
        )
        .await?;

    Ok(HttpResponse::Created().json(views::comment(&comment)))
}
