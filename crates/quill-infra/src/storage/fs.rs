//! Filesystem avatar store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::ports::{AvatarStore, StorageError};

/// Image types accepted for avatars, with their file extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Stores avatars as `avatars/{user_id}.{ext}` under the media root.
///
/// One file per user: saving replaces the previous avatar, including one
/// stored under a different extension.
pub struct FsAvatarStore {
    media_root: PathBuf,
}

impl FsAvatarStore {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    fn extension_for(content_type: &str) -> Option<&'static str> {
        ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| *ext)
    }

    fn avatars_dir(&self) -> PathBuf {
        self.media_root.join("avatars")
    }
}

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

#[async_trait]
impl AvatarStore for FsAvatarStore {
    async fn save(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let ext = Self::extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedContentType(content_type.to_string()))?;

        let dir = self.avatars_dir();
        tokio::fs::create_dir_all(&dir).await.map_err(io_err)?;

        // Drop stale files stored under another extension.
        for (_, other_ext) in ALLOWED_TYPES {
            if *other_ext != ext {
                let stale = dir.join(format!("{user_id}.{other_ext}"));
                if tokio::fs::try_exists(&stale).await.unwrap_or(false) {
                    tokio::fs::remove_file(&stale).await.map_err(io_err)?;
                }
            }
        }

        let filename = format!("{user_id}.{ext}");
        tokio::fs::write(dir.join(&filename), bytes)
            .await
            .map_err(io_err)?;

        tracing::debug!(%user_id, %filename, size = bytes.len(), "Stored avatar");

        Ok(format!("avatars/{filename}"))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        // Stored paths are relative to the media root; refuse anything else.
        let rel = Path::new(path);
        if rel.is_absolute() || rel.components().any(|c| c.as_os_str() == "..") {
            return Err(StorageError::Io(format!("invalid avatar path: {path}")));
        }

        let full = self.media_root.join(rel);
        if tokio::fs::try_exists(&full).await.unwrap_or(false) {
            tokio::fs::remove_file(&full).await.map_err(io_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (FsAvatarStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("quill-media-{}", Uuid::new_v4()));
        (FsAvatarStore::new(&root), root)
    }

    #[tokio::test]
    async fn test_save_and_replace_avatar() {
        let (store, root) = temp_store();
        let user_id = Uuid::new_v4();

        let path = store.save(user_id, "image/png", b"png-bytes").await.unwrap();
        assert_eq!(path, format!("avatars/{user_id}.png"));
        assert!(root.join(&path).exists());

        // Re-upload as jpeg replaces the png file.
        let path = store.save(user_id, "image/jpeg", b"jpg-bytes").await.unwrap();
        assert_eq!(path, format!("avatars/{user_id}.jpg"));
        assert!(root.join(&path).exists());
        assert!(!root.join(format!("avatars/{user_id}.png")).exists());

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_unknown_content_type() {
        let (store, _root) = temp_store();

        let result = store
            .save(Uuid::new_v4(), "application/pdf", b"not-an-image")
            .await;

        assert!(matches!(
            result,
            Err(StorageError::UnsupportedContentType(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_refuses_traversal() {
        let (store, _root) = temp_store();

        let result = store.delete("../etc/passwd").await;
        assert!(result.is_err());
    }
}
