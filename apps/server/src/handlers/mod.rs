//! HTTP API handlers and route configuration.

mod auth;
mod comments;
mod health;
mod install;
mod posts;
pub(crate) mod profile;

use std::collections::HashMap;

use actix_web::web;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_shared::dto::{CommentResponse, PostResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .route("/posts", web::get().to(posts::list))
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{id}", web::get().to(posts::get))
            .route("/posts/{id}", web::put().to(posts::update))
            .route("/posts/{id}", web::delete().to(posts::delete))
            .route("/posts/{id}/comments", web::get().to(comments::list))
            .route("/posts/{id}/comments", web::post().to(comments::create))
            // Own profile
            .route("/profile", web::get().to(profile::get))
            .route("/profile", web::put().to(profile::update)),
    )
    // Demo data installer lives outside the /api scope, like the pages.
    .route("/install", web::get().to(install::install));
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

pub(crate) fn post_response(post: Post, author: &User) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author: user_response(author),
        created_at: post.created_at.to_rfc3339(),
    }
}

pub(crate) fn comment_response(comment: Comment, author: &User) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        content: comment.content,
        author: user_response(author),
        created_at: comment.created_at.to_rfc3339(),
    }
}

/// Fetch the authors referenced by a batch of records, deduplicated.
pub(crate) async fn load_authors(
    state: &AppState,
    ids: impl Iterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, User>> {
    let mut authors = HashMap::new();
    for id in ids {
        if authors.contains_key(&id) {
            continue;
        }
        let user = state
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Author {id} missing for stored record")))?;
        authors.insert(id, user);
    }
    Ok(authors)
}
