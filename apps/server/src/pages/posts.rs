//! Post pages: listing, detail with comments, create/edit/delete flows.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{Comment, Post};

use crate::handlers::load_authors;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::pages::{base_context, format_timestamp, redirect, render};
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

#[derive(Serialize)]
struct PostView {
    id: String,
    title: String,
    content: String,
    author: String,
    created_at: String,
}

#[derive(Serialize)]
struct CommentView {
    id: String,
    content: String,
    author: String,
    created_at: String,
}

fn post_view(post: &Post, author: &str) -> PostView {
    PostView {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        author: author.to_string(),
        created_at: format_timestamp(&post.created_at),
    }
}

fn comment_view(comment: &Comment, author: &str) -> CommentView {
    CommentView {
        id: comment.id.to_string(),
        content: comment.content.clone(),
        author: author.to_string(),
        created_at: format_timestamp(&comment.created_at),
    }
}

/// GET / and GET /posts
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let authors = load_authors(&state, posts.iter().map(|p| p.author_id)).await?;

    let views: Vec<PostView> = posts
        .iter()
        .map(|post| post_view(post, &authors[&post.author_id].username))
        .collect();

    let mut ctx = base_context(identity.0.as_ref());
    ctx.insert("posts", &views);
    render(&state, "posts/list.html", &ctx)
}

/// Build the detail-page context shared by the GET view and the comment
/// form re-render.
async fn detail_context(
    state: &AppState,
    id: Uuid,
    identity: Option<&Identity>,
) -> AppResult<tera::Context> {
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

    let comments = state.comments.list_for_post(id).await?;
    let comment_authors = load_authors(state, comments.iter().map(|c| c.author_id)).await?;

    let comment_views: Vec<CommentView> = comments
        .iter()
        .map(|c| comment_view(c, &comment_authors[&c.author_id].username))
        .collect();

    let mut ctx = base_context(identity);
    ctx.insert("post", &post_view(&post, &author.username));
    ctx.insert("comments", &comment_views);
    ctx.insert(
        "can_edit",
        &identity.map(|i| i.user_id == post.author_id).unwrap_or(false),
    );
    Ok(ctx)
}

/// GET /posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let ctx = detail_context(&state, path.into_inner(), identity.0.as_ref()).await?;
    render(&state, "posts/detail.html", &ctx)
}

/// POST /posts/{id} - the comment form on the detail page.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let id = path.into_inner();
    let form = form.into_inner();

    if state.posts.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Post {id} not found")));
    }

    if let Err(errors) = validation::validate_comment(&form.content) {
        let mut ctx = detail_context(&state, id, Some(&identity)).await?;
        ctx.insert("comment_error", &errors.join(", "));
        return render(&state, "posts/detail.html", &ctx);
    }

    state
        .comments
        .insert(Comment::new(id, identity.user_id, form.content))
        .await?;

    Ok(redirect(&format!("/posts/{id}")))
}

/// GET /posts/create
pub async fn create_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };

    let mut ctx = base_context(Some(&identity));
    ctx.insert("form_action", "/posts/create");
    render(&state, "posts/form.html", &ctx)
}

/// POST /posts/create
pub async fn create_submit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let form = form.into_inner();

    if let Err(errors) = validation::validate_post(&form.title, &form.content) {
        let mut ctx = base_context(Some(&identity));
        ctx.insert("form_action", "/posts/create");
        ctx.insert("title", &form.title);
        ctx.insert("content", &form.content);
        ctx.insert("error", &errors.join(", "));
        return render(&state, "posts/form.html", &ctx);
    }

    let post = state
        .posts
        .insert(Post::new(identity.user_id, form.title, form.content))
        .await?;
    tracing::info!(post_id = %post.id, author = %identity.username, "Post created via page flow");

    Ok(redirect("/posts"))
}

/// GET /posts/{id}/edit - non-owners are sent back to the list.
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id != identity.user_id {
        return Ok(redirect("/posts"));
    }

    let mut ctx = base_context(Some(&identity));
    ctx.insert("form_action", &format!("/posts/{id}/edit"));
    ctx.insert("title", &post.title);
    ctx.insert("content", &post.content);
    ctx.insert("editing", &true);
    render(&state, "posts/form.html", &ctx)
}

/// POST /posts/{id}/edit
pub async fn edit_submit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let id = path.into_inner();
    let form = form.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id != identity.user_id {
        return Ok(redirect("/posts"));
    }

    if let Err(errors) = validation::validate_post(&form.title, &form.content) {
        let mut ctx = base_context(Some(&identity));
        ctx.insert("form_action", &format!("/posts/{id}/edit"));
        ctx.insert("title", &form.title);
        ctx.insert("content", &form.content);
        ctx.insert("editing", &true);
        ctx.insert("error", &errors.join(", "));
        return render(&state, "posts/form.html", &ctx);
    }

    post.title = form.title;
    post.content = form.content;
    state.posts.update(post).await?;

    Ok(redirect(&format!("/posts/{id}")))
}

/// GET /posts/{id}/delete - confirmation page, owner only.
pub async fn delete_confirm(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id != identity.user_id {
        return Ok(redirect("/posts"));
    }

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal("Post author missing".to_string()))?;

    let mut ctx = base_context(Some(&identity));
    ctx.insert("post", &post_view(&post, &author.username));
    render(&state, "posts/confirm_delete.html", &ctx)
}

/// POST /posts/{id}/delete - non-owners are redirected without deleting.
pub async fn delete_submit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if post.author_id == identity.user_id {
        state.posts.delete(id).await?;
        tracing::info!(post_id = %id, author = %identity.username, "Post deleted via page flow");
    }

    Ok(redirect("/posts"))
}
