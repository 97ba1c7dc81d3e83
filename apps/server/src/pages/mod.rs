//! Server-rendered page handlers (Tera templates).
//!
//! These sit beside the JSON API over the same repositories. The rendering
//! boundary stays here: repositories and domain types never see a template.

mod admin;
mod auth;
mod posts;
mod profile;

use actix_web::{HttpResponse, http::header, web};
use tera::Context;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Configure all page routes.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::list))
        .route("/register", web::get().to(auth::register_form))
        .route("/register", web::post().to(auth::register_submit))
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login_submit))
        .route("/logout", web::get().to(auth::logout))
        .route("/profile", web::get().to(profile::view))
        .route("/profile/edit", web::get().to(profile::edit_form))
        .route("/profile/edit", web::post().to(profile::edit_submit))
        .route("/posts", web::get().to(posts::list))
        .route("/posts/create", web::get().to(posts::create_form))
        .route("/posts/create", web::post().to(posts::create_submit))
        .route("/posts/{id}", web::get().to(posts::detail))
        .route("/posts/{id}", web::post().to(posts::add_comment))
        .route("/posts/{id}/edit", web::get().to(posts::edit_form))
        .route("/posts/{id}/edit", web::post().to(posts::edit_submit))
        .route("/posts/{id}/delete", web::get().to(posts::delete_confirm))
        .route("/posts/{id}/delete", web::post().to(posts::delete_submit))
        .service(
            web::scope("/admin-panel")
                .route("", web::get().to(admin::dashboard))
                .route("/users", web::get().to(admin::users))
                .route("/posts", web::get().to(admin::posts))
                .route("/posts/{id}/delete", web::post().to(admin::delete_post))
                .route("/comments", web::get().to(admin::comments))
                .route(
                    "/comments/{id}/delete",
                    web::post().to(admin::delete_comment),
                ),
        );
}

/// Render a template to an HTML response.
pub(crate) fn render(state: &AppState, name: &str, ctx: &Context) -> AppResult<HttpResponse> {
    let body = state.templates.render(name, ctx)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// See-other redirect, the post-form pattern throughout the page flow.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Context pre-loaded with the signed-in user, for the base template's nav.
pub(crate) fn base_context(identity: Option<&Identity>) -> Context {
    let mut ctx = Context::new();
    if let Some(identity) = identity {
        ctx.insert("current_user", &identity.username);
        ctx.insert("is_staff", &identity.is_staff);
    }
    ctx
}

/// Display form for timestamps on pages.
pub(crate) fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
