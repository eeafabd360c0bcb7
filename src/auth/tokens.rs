//! Session token issuing and verification
//!
//! Tokens are HS256 JWTs. Verification is pure computation: signature and
//! expiry only, no database access.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::{error, warn};

use super::models::{Claims, User};

/// Session lifetime
pub const SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing session token")]
    Missing,

    #[error("malformed session token")]
    Malformed,

    #[error("session token signature mismatch")]
    InvalidSignature,

    #[error("session token expired")]
    Expired,
}

/// Signing material loaded once from configuration
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a session token for `user`, valid for [`SESSION_TTL_DAYS`].
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = issued_at + Duration::days(SESSION_TTL_DAYS);
        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            iat: issued_at.timestamp().max(0) as usize,
            exp: exp.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            error!(error = %e, user_id = %user.id, "JWT encoding error");
            e
        })
    }

    /// Checks signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::Missing);
        }

        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let auth_error = match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    _ => AuthError::Malformed,
                };
                warn!(error = %e, reason = %auth_error, "JWT token validation failed");
                auth_error
            })
    }
}

/// Pulls the token out of an `Authorization` header value. Accepts
/// `Bearer <token>` or a raw token.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.map(str::trim_start).ok_or(AuthError::Missing)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    let token = if token == "Bearer" { "" } else { token };
    if token.is_empty() {
        Err(AuthError::Missing)
    } else {
        Ok(token)
    }
}
