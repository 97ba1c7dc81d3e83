//! Avatar storage port.

use async_trait::async_trait;
use uuid::Uuid;

/// Storage for uploaded avatar images.
///
/// Implementations own the naming scheme; callers get back the stored path
/// (relative to the media root) to persist on the profile. Saving replaces
/// any avatar previously stored for the same user.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn save(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Avatar storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("I/O failure: {0}")]
    Io(String),
}
