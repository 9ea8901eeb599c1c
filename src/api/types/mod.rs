//! API request, response and error types

pub mod apps;
pub mod error;
pub mod json;

pub use apps::{AppResponse, CreateAppBody, CreateAppResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
