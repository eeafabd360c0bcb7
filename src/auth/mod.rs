//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - GitHub OAuth login and local user resolution
//! - Session token issuing and verification
//! - AuthedUser / MaybeAuthedUser extractors for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod store;
pub mod tokens;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::{AuthedUser, MaybeAuthedUser};
pub use routes::auth_routes;
