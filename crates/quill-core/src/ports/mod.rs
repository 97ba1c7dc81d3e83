//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    COMMENT_PAGE_SIZE, CommentFilter, CommentRepository, POST_PAGE_SIZE, PostFilter,
    PostRepository, ProfileRepository, USER_PAGE_SIZE, UserRepository,
};
pub use storage::{AvatarStore, StorageError};
