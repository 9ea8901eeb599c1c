//! App validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during app validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppValidationError {
    #[error("App name cannot be empty")]
    EmptyName,

    #[error("App name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error(
        "App name must start with a lowercase letter and contain only lowercase letters, numbers and hyphens"
    )]
    InvalidName,

    #[error("Machine identifier cannot be empty")]
    EmptyMachine,
}

const MAX_APP_NAME_LENGTH: usize = 63;

static APP_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("app name pattern is valid"));

/// Validate an app name
///
/// App names end up in repository paths and unit commands, so they are kept
/// to a shell- and URL-safe alphabet.
pub fn validate_app_name(name: &str) -> Result<(), AppValidationError> {
    if name.is_empty() {
        return Err(AppValidationError::EmptyName);
    }

    if name.len() > MAX_APP_NAME_LENGTH {
        return Err(AppValidationError::NameTooLong(MAX_APP_NAME_LENGTH));
    }

    if !APP_NAME_PATTERN.is_match(name) {
        return Err(AppValidationError::InvalidName);
    }

    Ok(())
}
