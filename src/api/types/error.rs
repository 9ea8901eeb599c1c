//! API error type and the domain error to status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error categories reported in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    PermissionError,
    NotFoundError,
    ConflictError,
    UpstreamError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidRequestError => "invalid_request_error",
            Self::AuthenticationError => "authentication_error",
            Self::PermissionError => "permission_error",
            Self::NotFoundError => "not_found_error",
            Self::ConflictError => "conflict_error",
            Self::UpstreamError => "upstream_error",
            Self::ServerError => "server_error",
        };

        f.write_str(name)
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }
}

/// The single mapping from domain error kind to HTTP status
pub fn status_for(err: &DomainError) -> (StatusCode, ApiErrorType) {
    match err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, ApiErrorType::NotFoundError),
        DomainError::Forbidden { .. } => (StatusCode::FORBIDDEN, ApiErrorType::PermissionError),
        DomainError::Unauthorized { .. } => {
            (StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError)
        }
        DomainError::Conflict { .. } => (StatusCode::CONFLICT, ApiErrorType::ConflictError),
        DomainError::InvariantViolation { .. } => {
            (StatusCode::FORBIDDEN, ApiErrorType::PermissionError)
        }
        DomainError::BadInput { .. } => {
            (StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError)
        }
        DomainError::Upstream {
            timed_out: true, ..
        } => (StatusCode::GATEWAY_TIMEOUT, ApiErrorType::UpstreamError),
        DomainError::Upstream { .. } => (StatusCode::BAD_GATEWAY, ApiErrorType::UpstreamError),
        DomainError::Storage { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let (status, error_type) = status_for(&err);

        if status.is_server_error() {
            tracing::error!(kind = err.kind(), error = %err, "Request failed");
        }

        let message = match &err {
            DomainError::NotFound { message }
            | DomainError::Forbidden { message }
            | DomainError::Unauthorized { message }
            | DomainError::Conflict { message }
            | DomainError::InvariantViolation { message }
            | DomainError::BadInput { message }
            | DomainError::Storage { message }
            | DomainError::Internal { message } => message.clone(),
            DomainError::Upstream { service, message, .. } => format!("{}: {}", service, message),
        };

        Self::new(status, error_type, message).with_code(err.kind())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}
