//! User domain
//!
//! Users are identified by email and are referenced by value from teams.
//! Their lifecycle and authentication are owned by the identity provider.

mod entity;
mod validation;

pub use entity::{User, UserEmail};
pub use validation::{validate_email, UserValidationError};
