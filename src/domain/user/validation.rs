//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain exactly one '@' with a non-empty local part and domain")]
    InvalidEmailFormat,

    #[error("Email cannot contain whitespace")]
    EmailContainsWhitespace,
}

const MAX_EMAIL_LENGTH: usize = 254;

/// Validate a user email
///
/// Deliberately shallow: the identity provider is the authority on which
/// addresses exist, this only rejects values that cannot be an address.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::EmailContainsWhitespace);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(UserValidationError::InvalidEmailFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&email),
            Err(UserValidationError::EmailTooLong(254))
        );
    }

    #[test]
    fn test_invalid_email_format() {
        assert_eq!(
            validate_email("alice"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("@example.com"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("alice@"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("a@b@c"),
            Err(UserValidationError::InvalidEmailFormat)
        );
    }

    #[test]
    fn test_email_with_whitespace() {
        assert_eq!(
            validate_email("alice @example.com"),
            Err(UserValidationError::EmailContainsWhitespace)
        );
    }
}
