//! Persistence for memories

use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{Memory, MemoryRequest};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    pool: SqlitePool,
}

impl MemoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a memory owned by `user_id`. Fails with a foreign key
    /// violation when no such user exists.
    pub async fn create(&self, user_id: &str, req: &MemoryRequest) -> Result<Memory, sqlx::Error> {
        let memory = Memory {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            cover_url: req.cover_url.clone(),
            content: req.content.clone(),
            is_public: req.is_public,
            // Fixed-width UTC timestamps sort lexicographically.
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        sqlx::query(
            r#"
            INSERT INTO memories (id, user_id, content, cover_url, is_public, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&memory.id)
        .bind(&memory.user_id)
        .bind(&memory.content)
        .bind(&memory.cover_url)
        .bind(memory.is_public)
        .bind(&memory.created_at)
        .execute(&self.pool)
        .await?;

        Ok(memory)
    }

    pub async fn find(&self, id: &Uuid) -> Result<Option<Memory>, sqlx::Error> {
        sqlx::query_as::<_, Memory>("SELECT * FROM memories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
    }

    /// All memories owned by `user_id`, oldest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Memory>, sqlx::Error> {
        sqlx::query_as::<_, Memory>(
            "SELECT * FROM memories WHERE user_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Replaces the editable fields. `user_id` is never touched. Returns
    /// `None` if the row disappeared in the meantime.
    pub async fn update(&self, id: &Uuid, req: &MemoryRequest) -> Result<Option<Memory>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE memories SET content = ?, cover_url = ?, is_public = ? WHERE id = ?",
        )
        .bind(&req.content)
        .bind(&req.cover_url)
        .bind(req.is_public)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find(id).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
