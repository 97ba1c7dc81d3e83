use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Page, Post, Profile, User};
use crate::error::RepoError;

/// Fixed page size of the admin user listing.
pub const USER_PAGE_SIZE: u64 = 10;
/// Fixed page size of the admin post listing.
pub const POST_PAGE_SIZE: u64 = 15;
/// Fixed page size of the admin comment listing.
pub const COMMENT_PAGE_SIZE: u64 = 20;

/// Admin listing filter for posts: free-text search plus an optional author.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring matched against title and content.
    pub search: Option<String>,
    pub author_id: Option<Uuid>,
}

/// Admin listing filter for comments.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    /// Case-insensitive substring matched against the comment body.
    pub search: Option<String>,
    pub author_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: User) -> Result<User, RepoError>;

    async fn update(&self, user: User) -> Result<User, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Admin listing: case-insensitive substring search over username and
    /// email, newest first.
    async fn search(&self, query: Option<&str>, page: u64) -> Result<Page<User>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Profile repository. Profiles share their user's id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError>;

    async fn insert(&self, profile: Profile) -> Result<Profile, RepoError>;

    async fn update(&self, profile: Profile) -> Result<Profile, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post and all of its comments.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// All posts, reverse-chronological.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Admin listing over title/content with optional author filter,
    /// newest first.
    async fn search(&self, filter: &PostFilter, page: u64) -> Result<Page<Post>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError>;

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Comments of one post in creation order.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Admin listing over the comment body with optional author/post
    /// filters, newest first.
    async fn search(&self, filter: &CommentFilter, page: u64) -> Result<Page<Comment>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
