use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use utoipa::ToSchema;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is a valid regex")
});

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Human readable description of the violated constraint
    pub message: String,
}

/// Every constraint violation found in one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }

    /// Turns the collected violations into a result.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Rejects strings longer than `max` characters.
    pub fn check_max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(field, format!("must be at most {max} characters"));
        }
        self
    }

    /// Rejects numbers below `min`.
    pub fn check_min(&mut self, field: &str, value: f64, min: f64) -> &mut Self {
        if value.is_nan() || value < min {
            self.add(field, format!("must be greater than or equal to {min}"));
        }
        self
    }

    /// Rejects strings that are not a syntactically valid email address.
    pub fn check_email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL_PATTERN.is_match(value) {
            self.add(field, "must be a valid email address".to_string());
        }
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|error| error.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Field-level constraints checked before any statement reaches the database.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
