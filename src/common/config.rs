// src/common/config.rs
//! Process configuration, loaded once at startup.

use std::env;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://memories.db";
const DEFAULT_PORT: u16 = 3333;
const DEFAULT_GITHUB_OAUTH_URL: &str = "https://github.com";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// GitHub OAuth application credentials and endpoints
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub oauth_url: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub github: GitHubConfig,
    /// `None` reflects whatever origin the request came from.
    pub cors_origins: Option<Vec<String>>,
    pub reset_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let jwt_secret = required("JWT_SECRET")?;
        let client_id = required("GITHUB_CLIENT_ID")?;
        let client_secret = required("GITHUB_CLIENT_SECRET")?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS").map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        });

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port,
            jwt_secret,
            github: GitHubConfig {
                client_id,
                client_secret,
                oauth_url: lookup("GITHUB_OAUTH_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_OAUTH_URL.to_string()),
                api_url: lookup("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            },
            cors_origins,
            reset_db: lookup("RESET_DB")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        })
    }
}
