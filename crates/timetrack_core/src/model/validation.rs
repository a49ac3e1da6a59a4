//! Field validation rules shared by entity drafts.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted length, in characters, for names and titles.
pub const TEXT_MIN_CHARS: usize = 2;
/// Maximum accepted length, in characters, for names and titles.
pub const TEXT_MAX_CHARS: usize = 100;
/// Smallest accepted task estimate in hours.
pub const ESTIMATE_MIN_HOURS: f64 = 0.1;
/// Largest accepted task estimate in hours.
pub const ESTIMATE_MAX_HOURS: f64 = 1000.0;

/// Validation failure for a draft about to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Trimmed text is shorter or longer than allowed.
    TextLength {
        field: &'static str,
        actual: usize,
    },
    /// Estimate is not finite or outside the accepted range.
    EstimateOutOfRange { value: f64 },
    /// Time entry end is equal to or earlier than its start.
    EndNotAfterStart,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextLength { field, actual } => write!(
                f,
                "{field} must be between {TEXT_MIN_CHARS} and {TEXT_MAX_CHARS} characters (got {actual})"
            ),
            Self::EstimateOutOfRange { value } => write!(
                f,
                "estimateHours must be between {ESTIMATE_MIN_HOURS} and {ESTIMATE_MAX_HOURS} (got {value})"
            ),
            Self::EndNotAfterStart => write!(f, "End time must be after start time"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and checks its character length.
pub fn normalize_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let actual = trimmed.chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&actual) {
        return Err(ValidationError::TextLength { field, actual });
    }
    Ok(trimmed.to_string())
}

/// Checks that an estimate is a finite number inside the accepted range.
pub fn check_estimate(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || !(ESTIMATE_MIN_HOURS..=ESTIMATE_MAX_HOURS).contains(&value) {
        return Err(ValidationError::EstimateOutOfRange { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{check_estimate, normalize_text, ValidationError};

    #[test]
    fn normalize_text_trims_and_counts_chars_not_bytes() {
        assert_eq!(normalize_text("name", "  Jo  ").unwrap(), "Jo");
        assert_eq!(normalize_text("name", "Ωé").unwrap(), "Ωé");
    }

    #[test]
    fn normalize_text_rejects_short_and_long_values() {
        let short = normalize_text("fullName", " a ").unwrap_err();
        assert_eq!(
            short,
            ValidationError::TextLength {
                field: "fullName",
                actual: 1
            }
        );

        let long = "x".repeat(101);
        assert!(normalize_text("fullName", &long).is_err());
        assert!(normalize_text("fullName", &"x".repeat(100)).is_ok());
    }

    #[test]
    fn check_estimate_enforces_bounds() {
        assert!(check_estimate(0.1).is_ok());
        assert!(check_estimate(1000.0).is_ok());
        assert!(check_estimate(0.05).is_err());
        assert!(check_estimate(1000.5).is_err());
        assert!(check_estimate(f64::NAN).is_err());
    }
}
