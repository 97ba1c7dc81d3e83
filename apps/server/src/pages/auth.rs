//! Registration, login and logout pages.

use actix_web::{HttpResponse, cookie::Cookie, web};
use serde::Deserialize;
use std::sync::Arc;

use quill_core::domain::{Profile, User};
use quill_core::ports::{PasswordService, TokenService};

use crate::middleware::auth::SESSION_COOKIE;
use crate::middleware::error::{AppError, AppResult};
use crate::pages::{base_context, redirect, render};
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /register
pub async fn register_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, "auth/register.html", &base_context(None))
}

/// POST /register
pub async fn register_submit(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let mut ctx = base_context(None);
    ctx.insert("username", &form.username);
    ctx.insert("email", &form.email);

    if let Err(errors) = validation::validate_registration(&form.username, &form.email, &form.password)
    {
        ctx.insert("error", &errors.join(", "));
        return render(&state, "auth/register.html", &ctx);
    }

    if state.users.find_by_username(&form.username).await?.is_some() {
        ctx.insert("error", "Username already taken");
        return render(&state, "auth/register.html", &ctx);
    }
    if state.users.find_by_email(&form.email).await?.is_some() {
        ctx.insert("error", "Email already registered");
        return render(&state, "auth/register.html", &ctx);
    }

    let password_hash = password_service
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(User::new(form.username, form.email, password_hash))
        .await?;
    state.profiles.insert(Profile::empty(user.id)).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered via page flow");

    Ok(redirect("/login"))
}

/// GET /login
pub async fn login_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, "auth/login.html", &base_context(None))
}

/// POST /login
pub async fn login_submit(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let mut ctx = base_context(None);
    ctx.insert("username", &form.username);

    let user = match state.users.find_by_username(&form.username).await? {
        Some(user) if user.is_active => user,
        _ => {
            ctx.insert("error", "Invalid username or password");
            return render(&state, "auth/login.html", &ctx);
        }
    };

    let valid = password_service
        .verify(&form.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        ctx.insert("error", "Invalid username or password");
        return render(&state, "auth/login.html", &ctx);
    }

    let token = token_service
        .issue(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish();

    let mut response = redirect("/posts");
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(response)
}

/// GET /logout
pub async fn logout() -> AppResult<HttpResponse> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    let mut response = redirect("/login");
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(response)
}
