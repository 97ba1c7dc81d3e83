//! Avatar storage implementations.

mod fs;

pub use fs::FsAvatarStore;
