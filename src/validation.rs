//! Validation of flattened property values against their schema

use jsonschema::{Draft, JSONSchema, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outcome of validating a node: `Ok` or a non-empty list of errors
pub type Validation = std::result::Result<(), Vec<ErrorRecord>>;

/// One structured validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Dotted path to the offending value (`link.url`), or the schema path
    pub property: String,
    /// Human-readable description
    pub message: String,
    /// The schema keyword that failed (`type`, `enum`, ...)
    pub constraint: Option<String>,
}

impl ErrorRecord {
    pub fn new(property: impl Into<String>, message: impl Into<String>, constraint: Option<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
            constraint,
        }
    }

    /// The top-level error used when a validator fails without saying why
    pub fn schema_failure(schema_path: Option<&str>) -> Self {
        Self::new(
            schema_path.unwrap_or_default(),
            "The JSON schema failed validation.",
            None,
        )
    }

    fn from_validation_error(error: &ValidationError<'_>) -> Self {
        let schema_path = error.schema_path.to_string();
        let constraint = schema_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
        let property = error
            .instance_path
            .to_string()
            .trim_start_matches('/')
            .replace('/', ".");

        Self::new(property, error.to_string(), constraint)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = if self.property.is_empty() { "property" } else { &self.property };
        write!(
            f,
            "\"{}\" in property \"{}\" for constraint {}",
            self.message,
            property,
            self.constraint.as_deref().unwrap_or("unknown")
        )
    }
}

/// Result of one validator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    valid: bool,
    errors: Vec<ErrorRecord>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<ErrorRecord>) -> Self {
        Self { valid: false, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors
    }
}

/// Checks plain data against a schema
///
/// Each call is independent, so one validator can serve any number of trees.
pub trait Validator: Send + Sync {
    fn check(&self, value: &Value, schema: &Value) -> ValidationOutcome;
}

/// Validator backed by the `jsonschema` crate
#[derive(Debug, Clone, Copy)]
pub struct JsonSchemaValidator {
    draft: Draft,
}

impl JsonSchemaValidator {
    pub fn new(draft: Draft) -> Self {
        Self { draft }
    }
}

impl Default for JsonSchemaValidator {
    fn default() -> Self {
        Self::new(Draft::Draft7)
    }
}

impl Validator for JsonSchemaValidator {
    fn check(&self, value: &Value, schema: &Value) -> ValidationOutcome {
        let compiled = match JSONSchema::options().with_draft(self.draft).compile(schema) {
            Ok(compiled) => compiled,
            Err(error) => {
                return ValidationOutcome::invalid(vec![ErrorRecord::new(
                    error.schema_path.to_string(),
                    format!("Invalid schema: {}", error),
                    None,
                )])
            }
        };

        let errors: Vec<ErrorRecord> = match compiled.validate(value) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|e| ErrorRecord::from_validation_error(&e)).collect(),
        };

        if errors.is_empty() {
            ValidationOutcome::valid()
        } else {
            ValidationOutcome::invalid(errors)
        }
    }
}
