//! Maps a GitHub identity onto exactly one local user

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::models::{RemoteIdentity, User};
use super::store::{StoreError, UserStore};
use crate::common::ApiError;

/// Returns the user for `identity.provider_id`, creating it on first login.
///
/// Existing users are returned unchanged; the profile is not re-synced. When
/// two first logins race, the loser's insert hits the unique constraint and
/// the row written by the winner is returned instead.
pub async fn resolve_user(store: &UserStore, identity: &RemoteIdentity) -> Result<User, ApiError> {
    if let Some(user) = store
        .find_by_provider_id(identity.provider_id)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                provider_id = identity.provider_id,
                "Database error checking existing user during login"
            );
            ApiError::DatabaseError(e)
        })?
    {
        debug!(user_id = %user.id, provider_id = identity.provider_id, "Found existing user");
        return Ok(user);
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        provider_id: identity.provider_id,
        login: identity.login.clone(),
        name: identity.name.clone(),
        avatar_url: identity.avatar_url.clone(),
        created_at: Utc::now().to_rfc3339(),
    };

    match store.insert(&user).await {
        Ok(()) => {
            info!(
                user_id = %user.id,
                provider_id = user.provider_id,
                login = %user.login,
                "Created new user account via GitHub OAuth"
            );
            Ok(user)
        }
        Err(StoreError::Conflict) => {
            warn!(
                provider_id = identity.provider_id,
                "Concurrent first login detected, re-reading existing user"
            );
            store
                .find_by_provider_id(identity.provider_id)
                .await
                .map_err(ApiError::DatabaseError)?
                .ok_or_else(|| {
                    ApiError::InternalServer("user vanished after insert conflict".to_string())
                })
        }
        Err(StoreError::Database(e)) => {
            error!(
                error = %e,
                provider_id = identity.provider_id,
                "Database error inserting new user during login"
            );
            Err(ApiError::DatabaseError(e))
        }
    }
}
