//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /register` - GitHub OAuth code login
pub fn auth_routes() -> Router {
    Router::new().route("/register", post(handlers::register))
}
