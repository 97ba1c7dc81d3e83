//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information, nested inside post/comment payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A profile with its owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub website: Option<String>,
}

/// Request to update the caller's own profile.
///
/// `avatar` carries a base64 data-URL (`data:image/png;base64,...`); when
/// present the stored image is replaced. Omitted fields clear nothing -
/// `bio`/`website` overwrite with whatever is sent, as a form submit does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<String>,
}

/// Request to create or edit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
}

/// A post with its author embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: UserResponse,
    pub created_at: String,
}

/// Request to add a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub content: String,
}

/// A comment with its author embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author: UserResponse,
    pub created_at: String,
}

/// Outcome of the demo-data installer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallResponse {
    pub message: String,
    pub created: bool,
}
