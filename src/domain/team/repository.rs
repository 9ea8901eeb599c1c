//! Team repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamName};
use crate::domain::user::UserEmail;
use crate::domain::DomainError;

/// Repository for reading teams
///
/// Team lifecycle is owned elsewhere; the platform only creates teams when
/// seeding a development store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by name
    async fn get(&self, name: &TeamName) -> Result<Option<Team>, DomainError>;

    /// Find every team the given user is a member of
    async fn find_by_member(&self, email: &UserEmail) -> Result<Vec<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Check if a team exists
    async fn exists(&self, name: &TeamName) -> Result<bool, DomainError>;
}
