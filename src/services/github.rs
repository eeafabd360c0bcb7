// src/services/github.rs
use reqwest::{header::ACCEPT, Client, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::auth::models::RemoteIdentity;
use crate::common::config::GitHubConfig;
use crate::common::safe_token_log;

/// The GitHub profile did not have the shape the login flow relies on.
#[derive(Debug, Error)]
#[error("profile schema mismatch: {0}")]
pub struct SchemaError(pub String);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),

    #[error("Profile request failed: {0}")]
    ProfileFailed(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Body of the access token endpoint. GitHub answers a rejected code with
/// a 200 carrying `error` instead of `access_token`.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubProfile {
    id: i64,
    login: String,
    name: String,
    avatar_url: String,
}

#[derive(Debug, Clone)]
pub struct GitHubService {
    config: GitHubConfig,
    client: Client,
}

impl GitHubService {
    pub fn new(config: GitHubConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Runs the whole login handshake: code exchange, then profile fetch.
    pub async fn authenticate(&self, code: &str) -> Result<RemoteIdentity, ProviderError> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_profile(&access_token).await
    }

    /// Exchange authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<String, ProviderError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
        ];

        debug!("Exchanging GitHub authorization code for access token");

        let response = self
            .client
            .post(endpoint(&self.config.oauth_url, "login/oauth/access_token"))
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting GitHub token endpoint");
                ProviderError::RequestFailed(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(ProviderError::ExchangeFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .json::<AccessTokenResponse>()
            .await
            .map_err(|e| ProviderError::ExchangeFailed(e.to_string()))?;

        match body.access_token {
            Some(token) if !token.is_empty() => {
                debug!(access_token = %safe_token_log(&token), "GitHub code exchange successful");
                Ok(token)
            }
            _ => {
                let reason = body
                    .error_description
                    .or(body.error)
                    .unwrap_or_else(|| "no access_token in response".to_string());
                warn!(reason = %reason, "GitHub rejected authorization code");
                Err(ProviderError::ExchangeFailed(reason))
            }
        }
    }

    /// Fetch the authenticated user's profile
    pub async fn fetch_profile(&self, access_token: &str) -> Result<RemoteIdentity, ProviderError> {
        let response = self
            .client
            .get(endpoint(&self.config.api_url, "user"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting GitHub user endpoint");
                ProviderError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "GitHub user endpoint returned error status");
            return Err(ProviderError::ProfileFailed(format!("HTTP {}", status)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SchemaError(e.to_string()))?;

        let identity = parse_profile(body)?;
        info!(
            provider_id = identity.provider_id,
            login = %identity.login,
            "Fetched GitHub profile"
        );
        Ok(identity)
    }
}

/// Checks a raw profile payload against the fields login needs.
pub fn parse_profile(body: Value) -> Result<RemoteIdentity, SchemaError> {
    let profile: GitHubProfile =
        serde_json::from_value(body).map_err(|e| SchemaError(e.to_string()))?;

    Url::parse(&profile.avatar_url)
        .map_err(|e| SchemaError(format!("avatar_url: {}", e)))?;

    Ok(RemoteIdentity {
        provider_id: profile.id,
        login: profile.login,
        name: profile.name,
        avatar_url: profile.avatar_url,
    })
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
