//! Team domain module
//!
//! Teams are the unit of access control. A team owns nothing itself; apps
//! reference teams by name and users gain access to an app through membership
//! in one of its teams.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamName};
pub use repository::TeamRepository;
pub use validation::{validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
