//! # Memories Module
//!
//! CRUD over memory records with per-record ownership and visibility checks.

pub mod guard;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;
pub mod validators;


pub use routes::memories_routes;
