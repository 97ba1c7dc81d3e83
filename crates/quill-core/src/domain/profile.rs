use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile entity - optional extended attributes of a user.
///
/// One-to-one with [`super::User`]; `user_id` is both identity and foreign
/// key. `avatar` holds a path relative to the media root, not the bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub website: Option<String>,
}

impl Profile {
    /// Create the empty profile that registration attaches to a new user.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            bio: None,
            avatar: None,
            website: None,
        }
    }
}
