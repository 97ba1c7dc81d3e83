//! Staff-only back-office: dashboard, searchable listings, moderation.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::Page;
use quill_core::ports::{CommentFilter, PostFilter};

use crate::handlers::load_authors;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::pages::{base_context, format_timestamp, redirect, render};
use crate::state::AppState;

/// Query parameters shared by the admin listing screens.
#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub search: Option<String>,
    pub author: Option<Uuid>,
    pub post: Option<Uuid>,
    pub page: Option<u64>,
}

#[derive(Serialize)]
struct Pagination {
    page: u64,
    total_pages: u64,
    total_items: u64,
    has_prev: bool,
    has_next: bool,
}

fn pagination<T>(page: &Page<T>) -> Pagination {
    Pagination {
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_prev: page.has_prev(),
        has_next: page.has_next(),
    }
}

/// First 50 characters of a comment for the listing column.
fn content_preview(content: &str) -> String {
    const MAX_CHARS: usize = 50;
    if content.chars().count() > MAX_CHARS {
        let cut: String = content.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

/// Resolve the staff identity or bounce the visitor to the login page.
fn require_staff(identity: &OptionalIdentity) -> Result<&Identity, HttpResponse> {
    match &identity.0 {
        Some(identity) if identity.is_staff => Ok(identity),
        _ => Err(redirect("/login")),
    }
}

/// Carry the active filters into the template for pagination links.
fn insert_filters(ctx: &mut tera::Context, query: &AdminQuery) {
    ctx.insert("search", &query.search.as_deref().unwrap_or(""));
    if let Some(author) = query.author {
        ctx.insert("author_filter", &author.to_string());
    }
    if let Some(post) = query.post {
        ctx.insert("post_filter", &post.to_string());
    }
}

/// GET /admin-panel
pub async fn dashboard(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };

    let mut ctx = base_context(Some(identity));
    ctx.insert("user_count", &state.users.count().await?);
    ctx.insert("post_count", &state.posts.count().await?);
    ctx.insert("comment_count", &state.comments.count().await?);
    render(&state, "admin/dashboard.html", &ctx)
}

#[derive(Serialize)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    is_active: bool,
    is_staff: bool,
    date_joined: String,
}

/// GET /admin-panel/users
pub async fn users(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<AdminQuery>,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let query = query.into_inner();

    let page = state
        .users
        .search(query.search.as_deref(), query.page.unwrap_or(1))
        .await?;

    let rows: Vec<UserRow> = page
        .items
        .iter()
        .map(|user| UserRow {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            date_joined: format_timestamp(&user.date_joined),
        })
        .collect();

    let mut ctx = base_context(Some(identity));
    ctx.insert("users", &rows);
    ctx.insert("pagination", &pagination(&page));
    insert_filters(&mut ctx, &query);
    render(&state, "admin/users.html", &ctx)
}

#[derive(Serialize)]
struct PostRow {
    id: String,
    title: String,
    author: String,
    created_at: String,
}

/// GET /admin-panel/posts
pub async fn posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<AdminQuery>,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let query = query.into_inner();

    let filter = PostFilter {
        search: query.search.clone(),
        author_id: query.author,
    };
    let page = state.posts.search(&filter, query.page.unwrap_or(1)).await?;
    let authors = load_authors(&state, page.items.iter().map(|p| p.author_id)).await?;

    let rows: Vec<PostRow> = page
        .items
        .iter()
        .map(|post| PostRow {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: authors[&post.author_id].username.clone(),
            created_at: format_timestamp(&post.created_at),
        })
        .collect();

    let mut ctx = base_context(Some(identity));
    ctx.insert("posts", &rows);
    ctx.insert("pagination", &pagination(&page));
    insert_filters(&mut ctx, &query);
    render(&state, "admin/posts.html", &ctx)
}

#[derive(Serialize)]
struct CommentRow {
    id: String,
    preview: String,
    author: String,
    post_id: String,
    created_at: String,
}

/// GET /admin-panel/comments
pub async fn comments(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<AdminQuery>,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let query = query.into_inner();

    let filter = CommentFilter {
        search: query.search.clone(),
        author_id: query.author,
        post_id: query.post,
    };
    let page = state
        .comments
        .search(&filter, query.page.unwrap_or(1))
        .await?;
    let authors = load_authors(&state, page.items.iter().map(|c| c.author_id)).await?;

    let rows: Vec<CommentRow> = page
        .items
        .iter()
        .map(|comment| CommentRow {
            id: comment.id.to_string(),
            preview: content_preview(&comment.content),
            author: authors[&comment.author_id].username.clone(),
            post_id: comment.post_id.to_string(),
            created_at: format_timestamp(&comment.created_at),
        })
        .collect();

    let mut ctx = base_context(Some(identity));
    ctx.insert("comments", &rows);
    ctx.insert("pagination", &pagination(&page));
    insert_filters(&mut ctx, &query);
    render(&state, "admin/comments.html", &ctx)
}

/// POST /admin-panel/posts/{id}/delete - staff moderation.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let id = path.into_inner();

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, staff = %identity.username, "Post removed by staff");

    Ok(redirect("/admin-panel/posts"))
}

/// POST /admin-panel/comments/{id}/delete - staff moderation.
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let identity = match require_staff(&identity) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let id = path.into_inner();

    state.comments.delete(id).await?;
    tracing::info!(comment_id = %id, staff = %identity.username, "Comment removed by staff");

    Ok(redirect("/admin-panel/comments"))
}

#[cfg(test)]
mod tests {
    use super::content_preview;

    #[test]
    fn test_content_preview_truncates_long_bodies() {
        let short = "short comment";
        assert_eq!(content_preview(short), short);

        let long = "x".repeat(80);
        let preview = content_preview(&long);
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_content_preview_respects_char_boundaries() {
        let long = "é".repeat(60);
        let preview = content_preview(&long);
        assert!(preview.ends_with("..."));
    }
}
