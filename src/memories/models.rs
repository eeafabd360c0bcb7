// src/memories/models.rs

use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Number of characters of content kept in a list excerpt
pub const EXCERPT_LENGTH: usize = 115;
pub const EXCERPT_MARKER: &str = "...";

/// Memory database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub user_id: String,
    pub cover_url: String,
    pub content: String,
    pub is_public: bool,
    pub created_at: String,
}

/// Body of `POST /memories` and `PUT /memories/:id`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRequest {
    pub content: String,
    pub cover_url: String,
    #[serde(default, deserialize_with = "deserialize_loose_bool")]
    pub is_public: bool,
}

/// List entry returned by `GET /memories`
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: String,
    pub cover_url: String,
    pub excerpt: String,
}

impl From<Memory> for MemorySummary {
    fn from(memory: Memory) -> Self {
        Self {
            excerpt: excerpt(&memory.content),
            id: memory.id,
            cover_url: memory.cover_url,
        }
    }
}

/// First [`EXCERPT_LENGTH`] characters of `content` followed by the marker.
/// The marker is appended even when nothing was cut.
pub fn excerpt(content: &str) -> String {
    let mut preview: String = content.chars().take(EXCERPT_LENGTH).collect();
    preview.push_str(EXCERPT_MARKER);
    preview
}

/// Accepts `true`/`false`, `"true"`/`"false"`, `1`/`0` or `null`.
fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseBool {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<LooseBool>::deserialize(deserializer)? {
        None => Ok(false),
        Some(LooseBool::Bool(b)) => Ok(b),
        Some(LooseBool::Int(0)) => Ok(false),
        Some(LooseBool::Int(1)) => Ok(true),
        Some(LooseBool::Text(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(LooseBool::Text(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
        Some(_) => Err(de::Error::custom("isPublic must be a boolean")),
    }
}
