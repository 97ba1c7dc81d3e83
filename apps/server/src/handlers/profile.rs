//! Own-profile handlers.

use actix_web::{HttpResponse, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use quill_core::domain::Profile;
use quill_shared::dto::{ProfileResponse, UpdateProfileRequest};

use crate::handlers::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Parse a `data:image/png;base64,...` payload into content type and bytes.
pub(crate) fn parse_data_url(data: &str) -> Option<(String, Vec<u8>)> {
    let rest = data.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let content_type = meta.strip_suffix(";base64")?;
    let bytes = BASE64.decode(payload.trim()).ok()?;
    Some((content_type.to_string(), bytes))
}

/// Look up the caller's profile, creating the empty row lazily for accounts
/// that predate it.
pub(crate) async fn find_or_create(
    state: &AppState,
    identity: &Identity,
) -> AppResult<Profile> {
    if let Some(profile) = state.profiles.find_by_user_id(identity.user_id).await? {
        return Ok(profile);
    }

    tracing::debug!(user_id = %identity.user_id, "Creating profile on first access");
    Ok(state
        .profiles
        .insert(Profile::empty(identity.user_id))
        .await?)
}

async fn to_response(state: &AppState, profile: Profile) -> AppResult<ProfileResponse> {
    let user = state
        .users
        .find_by_id(profile.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(ProfileResponse {
        user: user_response(&user),
        bio: profile.bio,
        avatar: profile.avatar,
        website: profile.website,
    })
}

/// GET /api/profile
pub async fn get(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profile = find_or_create(&state, &identity).await?;
    let response = to_response(&state, profile).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/profile - bio/website overwrite, avatar replace-on-upload.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut profile = find_or_create(&state, &identity).await?;
    profile.bio = req.bio.filter(|s| !s.is_empty());
    profile.website = req.website.filter(|s| !s.is_empty());

    if let Some(avatar) = req.avatar.filter(|s| !s.is_empty()) {
        let (content_type, bytes) = parse_data_url(&avatar).ok_or_else(|| {
            AppError::BadRequest("Avatar must be a base64 data-URL".to_string())
        })?;
        let stored = state
            .avatars
            .save(identity.user_id, &content_type, &bytes)
            .await?;
        profile.avatar = Some(stored);
    }

    let saved = state.profiles.update(profile).await?;
    tracing::info!(user_id = %identity.user_id, "Profile updated");

    let response = to_response(&state, saved).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::parse_data_url;

    #[test]
    fn test_parse_data_url() {
        let (content_type, bytes) = parse_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_parse_data_url_rejects_plain_base64() {
        assert!(parse_data_url("aGVsbG8=").is_none());
        assert!(parse_data_url("data:image/png,aGVsbG8=").is_none());
        assert!(parse_data_url("data:image/png;base64,!!!").is_none());
    }
}
