// src/main.rs
use axum::{extract::Extension, http::HeaderValue, middleware, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod common;
mod logging_middleware;
mod memories;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use auth::tokens::SessionKeys;
use common::{AppConfig, AppState};
use services::GitHubService;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    // Missing signing secret or GitHub credentials stop the process here.
    let config = AppConfig::from_env()?;

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let sessions = SessionKeys::new(&config.jwt_secret);
    let github = Arc::new(GitHubService::new(config.github.clone()));
    info!("GitHubService initialized");

    let state = Arc::new(AppState::new(pool, sessions, github));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = app_router(state)
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(cors_layer(config.cors_origins.as_deref()))
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🚀 HTTP server running on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Routes plus shared state, without transport layers.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(auth::auth_routes())
        .merge(memories::memories_routes())
        .layer(Extension(state))
}

/// Explicit origins when configured, otherwise the request origin is echoed.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(list) => AllowOrigin::list(
            list.iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ),
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
}
