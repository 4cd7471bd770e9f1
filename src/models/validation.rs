use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CoreError;

type Result<T> = std::result::Result<T, CoreError>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Email validation
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(CoreError::validation("Email cannot be empty"));
    }

    if email.len() > 255 {
        return Err(CoreError::validation(
            "Email cannot be longer than 255 characters",
        ));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(CoreError::validation("Invalid email format"));
    }

    Ok(())
}

/// Rejects missing or whitespace-only text
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Workout duration in minutes
pub fn validate_duration(minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(CoreError::validation(
            "duration must be a positive number of minutes",
        ));
    }
    Ok(())
}
