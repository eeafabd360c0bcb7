// src/memories/handlers.rs

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::guard::{authorize, MemoryAction};
use super::models::{Memory, MemorySummary};
use super::validators::{parse_memory_id, parse_memory_request};
use crate::auth::{AuthedUser, MaybeAuthedUser};
use crate::common::{ApiError, AppState};

/// Resolves a path id to a stored memory. Bad ids and missing rows are
/// reported before any ownership decision.
async fn load_memory(state: &AppState, raw_id: &str) -> Result<(Uuid, Memory), ApiError> {
    let id = parse_memory_id(raw_id)?;

    let memory = state
        .memories
        .find(&id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("memory not found".to_string()))?;

    Ok((id, memory))
}

/// GET /memories - Memories owned by the caller, oldest first
pub async fn list_memories(
    Extension(state): Extension<Arc<AppState>>,
    authed: AuthedUser,
) -> Result<Json<Vec<MemorySummary>>, ApiError> {
    let memories = state
        .memories
        .list_by_user(&authed.id)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(memories.into_iter().map(MemorySummary::from).collect()))
}

/// GET /memories/:id - Full memory if public or owned by the caller
pub async fn get_memory(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    caller: MaybeAuthedUser,
) -> Result<Json<Memory>, ApiError> {
    let (_, memory) = load_memory(&state, &id).await?;
    authorize(MemoryAction::Read, &memory, caller.subject())?;

    Ok(Json(memory))
}

/// POST /memories - Create a memory owned by the caller
pub async fn create_memory(
    Extension(state): Extension<Arc<AppState>>,
    authed: AuthedUser,
    Json(body): Json<Value>,
) -> Result<Json<Memory>, ApiError> {
    let req = parse_memory_request(body)?;

    let memory = state
        .memories
        .create(&authed.id, &req)
        .await
        .map_err(|e| {
            // The token outlived its user row.
            if matches!(&e, sqlx::Error::Database(db) if db.is_foreign_key_violation()) {
                warn!(user_id = %authed.id, "Memory create for unknown user rejected");
                ApiError::unauthorized()
            } else {
                error!(error = %e, user_id = %authed.id, "Database error creating memory");
                ApiError::DatabaseError(e)
            }
        })?;

    info!(memory_id = %memory.id, user_id = %authed.id, "Memory created");

    Ok(Json(memory))
}

/// PUT /memories/:id - Replace a memory owned by the caller
pub async fn update_memory(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    authed: AuthedUser,
    Json(body): Json<Value>,
) -> Result<Json<Memory>, ApiError> {
    let req = parse_memory_request(body)?;
    let (memory_id, existing) = load_memory(&state, &id).await?;
    authorize(MemoryAction::Update, &existing, Some(&authed.id))?;

    let updated = state
        .memories
        .update(&memory_id, &req)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("memory not found".to_string()))?;

    info!(memory_id = %updated.id, user_id = %authed.id, "Memory updated");

    Ok(Json(updated))
}

/// DELETE /memories/:id - Delete a memory owned by the caller
pub async fn delete_memory(
    Path(id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    authed: AuthedUser,
) -> Result<StatusCode, ApiError> {
    let (memory_id, existing) = load_memory(&state, &id).await?;
    authorize(MemoryAction::Delete, &existing, Some(&authed.id))?;

    let deleted = state
        .memories
        .delete(&memory_id)
        .await
        .map_err(ApiError::DatabaseError)?;

    if !deleted {
        return Err(ApiError::NotFound("memory not found".to_string()));
    }

    info!(memory_id = %existing.id, user_id = %authed.id, "Memory deleted");

    Ok(StatusCode::NO_CONTENT)
}
