//! Profile pages: view and edit the signed-in user's profile.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::handlers::profile::{find_or_create, parse_data_url};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::pages::{base_context, redirect, render};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub bio: Option<String>,
    pub website: Option<String>,
    /// Base64 data-URL from the upload widget; empty when untouched.
    pub avatar: Option<String>,
}

/// GET /profile
pub async fn view(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };

    let profile = find_or_create(&state, &identity).await?;

    let mut ctx = base_context(Some(&identity));
    ctx.insert("bio", &profile.bio);
    ctx.insert("website", &profile.website);
    ctx.insert("avatar", &profile.avatar);
    render(&state, "profile/view.html", &ctx)
}

/// GET /profile/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };

    let profile = find_or_create(&state, &identity).await?;

    let mut ctx = base_context(Some(&identity));
    ctx.insert("bio", &profile.bio);
    ctx.insert("website", &profile.website);
    ctx.insert("avatar", &profile.avatar);
    render(&state, "profile/edit.html", &ctx)
}

/// POST /profile/edit
pub async fn edit_submit(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<ProfileForm>,
) -> AppResult<HttpResponse> {
    let Some(identity) = identity.0 else {
        return Ok(redirect("/login"));
    };
    let form = form.into_inner();

    let mut profile = find_or_create(&state, &identity).await?;
    profile.bio = form.bio.filter(|s| !s.is_empty());
    profile.website = form.website.filter(|s| !s.is_empty());

    if let Some(avatar) = form.avatar.filter(|s| !s.is_empty()) {
        let Some((content_type, bytes)) = parse_data_url(&avatar) else {
            let mut ctx = base_context(Some(&identity));
            ctx.insert("bio", &profile.bio);
            ctx.insert("website", &profile.website);
            ctx.insert("avatar", &profile.avatar);
            ctx.insert("error", "Avatar upload was not a valid image payload");
            return render(&state, "profile/edit.html", &ctx);
        };

        match state.avatars.save(identity.user_id, &content_type, &bytes).await {
            Ok(stored) => profile.avatar = Some(stored),
            Err(quill_core::ports::StorageError::UnsupportedContentType(ct)) => {
                let mut ctx = base_context(Some(&identity));
                ctx.insert("bio", &profile.bio);
                ctx.insert("website", &profile.website);
                ctx.insert("avatar", &profile.avatar);
                ctx.insert("error", &format!("Unsupported image type: {ct}"));
                return render(&state, "profile/edit.html", &ctx);
            }
            Err(e) => return Err(AppError::from(e)),
        }
    }

    state.profiles.update(profile).await?;
    tracing::info!(user_id = %identity.user_id, "Profile updated via page flow");

    Ok(redirect("/profile"))
}
