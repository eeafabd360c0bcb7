//! Authentication handlers

use axum::extract::{Extension, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::models::{RegisterRequest, RegisterResponse};
use super::resolver::resolve_user;
use super::validators::RegisterValidator;
use crate::common::validation::parse_and_validate;
use crate::common::{ApiError, AppState};

/// POST /register
/// Logs a user in with a GitHub OAuth authorization code
///
/// # Request Body
/// ```json
/// { "code": "<github authorization code>" }
/// ```
///
/// # Response
/// ```json
/// { "token": "<session token>" }
/// ```
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let payload: RegisterRequest = parse_and_validate(body, &RegisterValidator)?;

    info!("🔐 Received GitHub login request");

    let identity = state.github.authenticate(&payload.code).await.map_err(|e| {
        warn!(error = %e, "GitHub authentication failed");
        ApiError::from(e)
    })?;

    let user = resolve_user(&state.users, &identity).await?;

    let token = state.sessions.issue(&user).map_err(|e| {
        error!(error = %e, user_id = %user.id, "Failed to sign session token");
        ApiError::InternalServer("jwt error".to_string())
    })?;

    info!(
        user_id = %user.id,
        provider_id = user.provider_id,
        "User authentication successful via GitHub OAuth"
    );

    Ok(Json(RegisterResponse { token }))
}
