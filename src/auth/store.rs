//! Persistence for local user records

use sqlx::SqlitePool;
use thiserror::Error;

use super::models::User;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same unique key already exists.
    #[error("record already exists")]
    Conflict,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Folds unique-constraint violations into [`StoreError::Conflict`].
    pub fn from_insert(e: sqlx::Error) -> Self {
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            StoreError::Conflict
        } else {
            StoreError::Database(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_provider_id(&self, provider_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE provider_id = ?")
            .bind(provider_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts `user`. Fails with [`StoreError::Conflict`] when its
    /// `provider_id` is already taken.
    pub async fn insert(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, provider_id, login, name, avatar_url, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(user.provider_id)
        .bind(&user.login)
        .bind(&user.name)
        .bind(&user.avatar_url)
        .bind(&user.created_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_insert)?;

        Ok(())
    }
}
