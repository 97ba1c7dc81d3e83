//! Comment handlers, nested under their post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_shared::dto::{CommentPayload, CommentResponse};

use crate::handlers::{comment_response, load_authors};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation;

/// GET /api/posts/{id}/comments - creation order.
pub async fn list(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    let comments = state.comments.list_for_post(post_id).await?;
    let authors = load_authors(&state, comments.iter().map(|c| c.author_id)).await?;

    let response: Vec<CommentResponse> = comments
        .into_iter()
        .map(|comment| {
            let author = &authors[&comment.author_id];
            comment_response(comment, author)
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentPayload>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    validation::validate_comment(&req.content).map_err(AppError::Validation)?;

    let comment = Comment::new(post_id, identity.user_id, req.content);
    let saved = state.comments.insert(comment).await?;

    tracing::info!(comment_id = %saved.id, post_id = %post_id, "Comment added");

    let author = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(HttpResponse::Created().json(comment_response(saved, &author)))
}
