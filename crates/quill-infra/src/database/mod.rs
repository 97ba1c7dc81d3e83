//! Database connection management and repositories.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresProfileRepository,
    PostgresUserRepository,
};

#[cfg(test)]
mod tests;
