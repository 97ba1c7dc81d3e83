//! Application state - shared across all handlers.

use std::sync::Arc;

use tera::Tera;

use quill_core::ports::{
    AvatarStore, CommentRepository, PostRepository, ProfileRepository, UserRepository,
};
use quill_infra::{
    DbConn, FsAvatarStore, PostgresCommentRepository, PostgresPostRepository,
    PostgresProfileRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub avatars: Arc<dyn AvatarStore>,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Build the application state around one database connection.
    pub fn new(db: DbConn, config: &AppConfig) -> anyhow::Result<Self> {
        let templates = Tera::new(&config.template_glob)
            .map_err(|e| anyhow::anyhow!("Failed to compile templates: {e}"))?;

        tracing::info!(
            templates = templates.get_template_names().count(),
            "Application state initialized"
        );

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
            avatars: Arc::new(FsAvatarStore::new(&config.media_root)),
            templates: Arc::new(templates),
        })
    }
}
