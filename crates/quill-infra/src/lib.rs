//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, JWT + Argon2 authentication, and
//! filesystem avatar storage.

pub mod auth;
pub mod database;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresPostRepository, PostgresProfileRepository,
    PostgresUserRepository, connect,
};
pub use sea_orm::DbConn;
pub use storage::FsAvatarStore;
