use thiserror::Error;

/// Core domain errors
///
/// The set of kinds is closed; the API layer maps each one to exactly one
/// status code (see `api::types::error`).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("Bad input: {message}")]
    BadInput { message: String },

    #[error("Upstream error: {service} - {message}")]
    Upstream {
        service: String,
        message: String,
        timed_out: bool,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn upstream_timeout(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Conflict { .. } => "conflict",
            Self::InvariantViolation { .. } => "invariant_violation",
            Self::BadInput { .. } => "bad_input",
            Self::Upstream { .. } => "upstream",
            Self::Storage { .. } => "storage",
            Self::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("App 'blog' not found");
        assert_eq!(error.to_string(), "Not found: App 'blog' not found");
    }

    #[test]
    fn test_invariant_violation_error() {
        let error = DomainError::invariant_violation("App would be orphaned");
        assert_eq!(error.to_string(), "Invariant violation: App would be orphaned");
        assert_eq!(error.kind(), "invariant_violation");
    }

    #[test]
    fn test_upstream_error() {
        let error = DomainError::upstream("unit", "connection refused");
        assert_eq!(error.to_string(), "Upstream error: unit - connection refused");
        assert!(matches!(error, DomainError::Upstream { timed_out: false, .. }));

        let timeout = DomainError::upstream_timeout("unit", "deadline exceeded");
        assert!(matches!(timeout, DomainError::Upstream { timed_out: true, .. }));
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Team already has access");
        assert_eq!(error.to_string(), "Conflict: Team already has access");
    }
}
