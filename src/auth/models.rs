//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    pub iat: usize,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub provider_id: i64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
    pub created_at: String,
}

/// Profile of the GitHub account that just logged in. Never stored as is.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteIdentity {
    pub provider_id: i64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
}

/// Body of `POST /register`
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub code: String,
}

#[derive(Serialize, Debug)]
pub struct RegisterResponse {
    pub token: String,
}
