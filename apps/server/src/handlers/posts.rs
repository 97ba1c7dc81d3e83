//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_shared::dto::{PostPayload, PostResponse};

use crate::handlers::{load_authors, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation;

/// GET /api/posts - all posts, newest first.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let authors = load_authors(&state, posts.iter().map(|p| p.author_id)).await?;

    let response: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| {
            let author = &authors[&post.author_id];
            post_response(post, author)
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal("Post author missing".to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(post, &author)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validation::validate_post(&req.title, &req.content).map_err(AppError::Validation)?;

    let post = Post::new(identity.user_id, req.title, req.content);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    let author = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(HttpResponse::Created().json(post_response(saved, &author)))
}

/// PUT /api/posts/{id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    validation::validate_post(&req.title, &req.content).map_err(AppError::Validation)?;

    post.title = req.title;
    post.content = req.content;
    let saved = state.posts.update(post).await?;

    let author = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(saved, &author)))
}

/// DELETE /api/posts/{id} - author only, removes the comments with it.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, author = %identity.username, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
