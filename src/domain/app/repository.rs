//! App repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::{App, AppName};
use crate::domain::team::TeamName;
use crate::domain::DomainError;

/// Repository for managing apps
///
/// Team-set changes are conditional updates performed atomically by the
/// store, never a read-modify-write by the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppRepository: Send + Sync + std::fmt::Debug {
    /// Get an app by name
    async fn get(&self, name: &AppName) -> Result<Option<App>, DomainError>;

    /// Find every app whose team set contains any of `teams`
    async fn find_by_teams(&self, teams: &[TeamName]) -> Result<Vec<App>, DomainError>;

    /// Create a new app, `Conflict` if the name is taken
    async fn create(&self, app: App) -> Result<App, DomainError>;

    /// Delete an app by name, returning the record as it was when removed
    async fn delete(&self, name: &AppName) -> Result<Option<App>, DomainError>;

    /// Add `team` to the app's team set if absent
    async fn grant_team(&self, name: &AppName, team: &TeamName) -> Result<App, DomainError>;

    /// Remove `team` from the app's team set unless it would leave the set empty
    async fn revoke_team(&self, name: &AppName, team: &TeamName) -> Result<App, DomainError>;
}
