//! # Quill Server
//!
//! The Actix-web HTTP server: JSON API under `/api`, server-rendered pages
//! everywhere else, both over the same repositories.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::NormalizePath, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod pages;
mod state;
mod telemetry;
mod validation;

use config::AppConfig;
use quill_core::ports::{PasswordService, TokenService};
use quill_infra::{Argon2PasswordService, JwtTokenService};
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;

    tracing::info!("Starting Quill server on {}:{}", config.host, config.port);

    let db = quill_infra::connect(&config.database).await?;
    let state = AppState::new(db, &config)?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    let media_root = config.media_root.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Django-style trailing slashes resolve to the same handlers
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .service(Files::new("/media", media_root.clone()))
            .configure(handlers::configure_routes)
            .configure(pages::configure_pages)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
