// Configuration validation

use crate::{ConfigError, Result};

/// Checks run on a typed configuration after it has been deserialized
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Common field checks for [`Validate`] implementations
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a number is within `min..=max`
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate that a value is one of `allowed`, ignoring case
    pub fn one_of(value: &str, allowed: &[&str], field: &str) -> Result<()> {
        if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be one of {}, got {}",
                field,
                allowed.join(", "),
                value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(ConfigValidator::not_empty("warden/0.1", "user_agent").is_ok());
        assert!(ConfigValidator::not_empty("  ", "user_agent").is_err());
    }

    #[test]
    fn test_in_range() {
        assert!(ConfigValidator::in_range(30, 1, 300, "timeout_secs").is_ok());
        let err = ConfigValidator::in_range(0, 1, 300, "timeout_secs").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: timeout_secs must be between 1 and 300, got 0"
        );
    }

    #[test]
    fn test_one_of() {
        assert!(ConfigValidator::one_of("JSON", &["json", "pretty"], "format").is_ok());
        assert!(ConfigValidator::one_of("xml", &["json", "pretty"], "format").is_err());
    }
}
