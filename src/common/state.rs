// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::store::UserStore;
use crate::auth::tokens::SessionKeys;
use crate::memories::store::MemoryStore;
use crate::services::GitHubService;

/// Application state containing stores, session keys and the GitHub client.
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub memories: MemoryStore,
    pub sessions: SessionKeys,
    pub github: Arc<GitHubService>,
}

impl AppState {
    pub fn new(db: SqlitePool, sessions: SessionKeys, github: Arc<GitHubService>) -> Self {
        Self {
            users: UserStore::new(db.clone()),
            memories: MemoryStore::new(db),
            sessions,
            github,
        }
    }
}
