//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;
mod upload;
mod views;


use actix_web::web;
use serde::de::DeserializeOwned;

use crate::middleware::error::{AppError, AppResult};

/// Decode a JSON request body.
///
/// Handlers take the raw body and decode it only after the access gate, so a
/// caller without rights sees 401 or 403 whatever they sent.
fn json_body<T: DeserializeOwned>(body: &web::Bytes) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Posts - `/posts/new` must be registered before `/posts/{id}`
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/new", web::get().to(posts::new_form))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/edit", web::get().to(posts::edit_form))
                    .route("/{id}/delete", web::get().to(posts::delete_confirmation))
                    .route("/{id}/comments", web::post().to(comments::add)),
            )
            // Categories
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            ),
    );
}
