// src/memories/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// # Routes
/// - `GET /memories` - caller's memories (excerpts)
/// - `POST /memories` - create
/// - `GET /memories/:id` - read, anonymous allowed for public memories
/// - `PUT /memories/:id` - replace (owner only)
/// - `DELETE /memories/:id` - delete (owner only)
pub fn memories_routes() -> Router {
    Router::new()
        .route(
            "/memories",
            get(handlers::list_memories).post(handlers::create_memory),
        )
        .route(
            "/memories/:id",
            get(handlers::get_memory)
                .put(handlers::update_memory)
                .delete(handlers::delete_memory),
        )
}
