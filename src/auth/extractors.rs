//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, warn};

use super::models::Claims;
use super::tokens::bearer_token;
use crate::common::{ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the session token carried in the `Authorization` header and
/// rejects the request with 401 before the handler runs. No database access.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    /// Local user id taken from the `sub` claim
    pub id: String,
}

impl From<Claims> for AuthedUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<Arc<AppState>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = bearer_token(header).map_err(|e| {
            warn!(reason = %e, "Authentication failed");
            ApiError::from(e)
        })?;

        let claims = app_state.sessions.verify(token)?;
        debug!(user_id = %claims.sub, "Session token verified");

        Ok(AuthedUser::from(claims))
    }
}

/// Optional variant for routes that also serve anonymous callers. A missing
/// or invalid token yields `None` instead of rejecting.
#[derive(Debug, Clone)]
pub struct MaybeAuthedUser(pub Option<AuthedUser>);

impl MaybeAuthedUser {
    pub fn subject(&self) -> Option<&str> {
        self.0.as_ref().map(|user| user.id.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthedUser(
            AuthedUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
