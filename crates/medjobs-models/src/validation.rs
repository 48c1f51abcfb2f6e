//! Boundary validation for incoming request bodies.

use thiserror::Error;

/// Result type for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a request body is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Email and password required")]
    MissingCredentials,

    #[error("Job ID is required")]
    MissingJobId,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid status")]
    InvalidStatus(String),

    #[error("Invalid employment type: {0}")]
    InvalidEmploymentType(String),
}

/// Drop absent or blank text.
///
/// Required fields treat the result `None` as missing; optional fields are
/// stored as NULL.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_dropped() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("x".into())), Some("x".into()));
    }
}
