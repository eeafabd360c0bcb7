// src/memories/validators.rs

use serde_json::Value;
use uuid::Uuid;

use super::models::MemoryRequest;
use crate::common::validation::parse_body;
use crate::common::ValidationResult;

/// Path ids must be UUIDs; anything else is rejected before touching the store.
pub fn parse_memory_id(raw: &str) -> Result<Uuid, ValidationResult> {
    Uuid::parse_str(raw).map_err(|_| {
        let mut result = ValidationResult::new();
        result.add_error("id", "Memory id must be a valid UUID");
        result
    })
}

pub fn parse_memory_request(body: Value) -> Result<MemoryRequest, ValidationResult> {
    parse_body(body)
}
