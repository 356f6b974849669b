//! Input validation utilities
//!
//! Validation is presence and shape only: a text field is missing when it is
//! absent, `null`, or blank.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::pothole::Severity;

/// The field's value when present and not blank
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Validate email shape
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Parse an optional severity, defaulting to medium when absent or blank
pub fn parse_severity(value: &Option<String>) -> Result<Severity, String> {
    match present(value) {
        Some(severity) => severity.parse(),
        None => Ok(Severity::default()),
    }
}
