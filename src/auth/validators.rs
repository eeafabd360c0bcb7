// src/auth/validators.rs

use super::models::RegisterRequest;
use crate::common::{ValidationResult, Validator};

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.code.trim().is_empty() {
            result.add_error("code", "Authorization code is required");
        }

        result
    }
}
