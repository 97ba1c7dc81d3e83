//! Demo data installer.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::{Comment, Post, Profile, User};
use quill_core::ports::PasswordService;
use quill_shared::ApiResponse;
use quill_shared::dto::InstallResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo123";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_BIO: &str = "Demo user";

const DEMO_POSTS: [(&str, &str); 3] = [
    ("Hello World!", "This is demo post."),
    (
        "Getting started",
        "Register an account, then create your first post from the posts page.",
    ),
    (
        "Comments welcome",
        "Any signed-in user can reply to a post. Try it on this one.",
    ),
];

const DEMO_COMMENTS: [&str; 5] = [
    "Demo comment",
    "Great write-up!",
    "Following this thread.",
    "Thanks for sharing.",
    "Looking forward to more posts.",
];

/// The canned comments spread round-robin over the canned posts:
/// comment i lands on post i mod 3.
fn demo_comment_assignments() -> Vec<(usize, &'static str)> {
    DEMO_COMMENTS
        .iter()
        .enumerate()
        .map(|(i, body)| (i % DEMO_POSTS.len(), *body))
        .collect()
}

/// GET /install - create the demo dataset once.
///
/// A second call finds the demo user and leaves the store untouched.
pub async fn install(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
) -> AppResult<HttpResponse> {
    if state.users.find_by_username(DEMO_USERNAME).await?.is_some() {
        tracing::info!("Demo data already installed, skipping");
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(InstallResponse {
            message: "Demo data already installed".to_string(),
            created: false,
        })));
    }

    let password_hash = password_service
        .hash(DEMO_PASSWORD)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(User::new(
            DEMO_USERNAME.to_string(),
            DEMO_EMAIL.to_string(),
            password_hash,
        ))
        .await?;

    let mut profile = Profile::empty(user.id);
    profile.bio = Some(DEMO_BIO.to_string());
    state.profiles.insert(profile).await?;

    let mut posts = Vec::with_capacity(DEMO_POSTS.len());
    for (title, content) in DEMO_POSTS {
        let post = state
            .posts
            .insert(Post::new(user.id, title.to_string(), content.to_string()))
            .await?;
        posts.push(post);
    }

    for (post_index, body) in demo_comment_assignments() {
        state
            .comments
            .insert(Comment::new(posts[post_index].id, user.id, body.to_string()))
            .await?;
    }

    tracing::info!(
        user_id = %user.id,
        posts = DEMO_POSTS.len(),
        comments = DEMO_COMMENTS.len(),
        "Demo data created"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(InstallResponse {
        message: "Demo data created!".to_string(),
        created: true,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_comments_cover_every_post() {
        let assignments = demo_comment_assignments();
        assert_eq!(assignments.len(), 5);

        // Round-robin over three posts: 0, 1, 2, 0, 1
        let targets: Vec<usize> = assignments.iter().map(|(i, _)| *i).collect();
        assert_eq!(targets, vec![0, 1, 2, 0, 1]);

        for post_index in 0..DEMO_POSTS.len() {
            assert!(targets.contains(&post_index));
        }
    }
}
