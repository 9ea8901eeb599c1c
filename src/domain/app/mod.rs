//! App domain module
//!
//! An app is a hosted application resource. Access to it is derived from the
//! set of teams it references, which must never become empty.

mod entity;
mod repository;
mod validation;

pub use entity::{App, AppName, TeamAccessError};
pub use repository::AppRepository;
pub use validation::{validate_app_name, AppValidationError};

#[cfg(test)]
pub use repository::MockAppRepository;
