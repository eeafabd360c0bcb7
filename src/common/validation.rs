// Common validation types and traits

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Converts into a `Result` carrying `value` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationResult> {
        if self.is_valid {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

/// Decodes an untyped JSON body into `T`, reporting a shape mismatch as a
/// field-level validation error.
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ValidationResult> {
    serde_json::from_value(body).map_err(|e| {
        let mut result = ValidationResult::new();
        result.add_error("body", &e.to_string());
        result
    })
}

/// Decodes and then runs `validator` over the typed value.
pub fn parse_and_validate<T, V>(body: Value, validator: &V) -> Result<T, ValidationResult>
where
    T: DeserializeOwned,
    V: Validator<T>,
{
    let data: T = parse_body(body)?;
    validator.validate(&data).into_result(data)
}
