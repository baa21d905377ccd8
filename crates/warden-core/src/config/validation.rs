//! Configuration validation utilities

use crate::WardenError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is required but missing or empty
    Required { field: String },
    /// Value exceeds an upper bound set by another field
    OutOfRange {
        field: String,
        max: u64,
        actual: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::OutOfRange { field, max, actual } => {
                write!(f, "Field '{field}' must be at most {max} (got {actual})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for WardenError {
    fn from(err: ValidationError) -> Self {
        WardenError::config(err.to_string())
    }
}

/// Configuration validator that accumulates validation rules
#[derive(Debug)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
    field_prefix: String,
}

impl ConfigValidator {
    /// Create a validator for a nested section
    pub fn for_section(section: &str) -> Self {
        Self {
            errors: Vec::new(),
            field_prefix: section.to_string(),
        }
    }

    /// Validate that a string value is non-empty
    pub fn non_empty(&mut self, field_name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: self.full_field_name(field_name),
            });
        }
        self
    }

    /// Validate that an optional value does not exceed `max`
    pub fn at_most(&mut self, field_name: &str, value: Option<u64>, max: u64) -> &mut Self {
        if let Some(actual) = value {
            if actual > max {
                self.errors.push(ValidationError::OutOfRange {
                    field: self.full_field_name(field_name),
                    max,
                    actual,
                });
            }
        }
        self
    }

    /// Get validation result, reporting the first failure
    pub fn result(self) -> ValidationResult {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(first),
        }
    }

    fn full_field_name(&self, field_name: &str) -> String {
        format!("{}.{}", self.field_prefix, field_name)
    }
}
