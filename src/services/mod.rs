// src/services/mod.rs
//
// Clients for the external services the API depends on

pub mod github;

// Re-export commonly used types for convenience
pub use github::GitHubService;
