//! Resolution of an app and the caller's derived access to it

use std::sync::Arc;

use tracing::debug;

use crate::domain::app::{App, AppName, AppRepository};
use crate::domain::team::{Team, TeamRepository};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Loads apps and checks derived access on every call
///
/// Nothing is cached: each check reads the current app and the caller's
/// current team memberships.
#[derive(Debug)]
pub struct AccessControl<A: AppRepository, T: TeamRepository> {
    apps: Arc<A>,
    teams: Arc<T>,
}

impl<A: AppRepository, T: TeamRepository> Clone for AccessControl<A, T> {
    fn clone(&self) -> Self {
        Self {
            apps: Arc::clone(&self.apps),
            teams: Arc::clone(&self.teams),
        }
    }
}

impl<A: AppRepository, T: TeamRepository> AccessControl<A, T> {
    pub fn new(apps: Arc<A>, teams: Arc<T>) -> Self {
        Self { apps, teams }
    }

    pub fn apps(&self) -> &A {
        &self.apps
    }

    pub fn teams(&self) -> &T {
        &self.teams
    }

    /// Teams the user currently belongs to
    pub async fn member_teams(&self, user: &User) -> Result<Vec<Team>, DomainError> {
        self.teams.find_by_member(user.email()).await
    }

    /// Load the named app if `user` may act on it
    ///
    /// `NotFound` if the name is invalid or no such app exists, `Forbidden`
    /// if the user belongs to none of the app's teams.
    pub async fn resolve(&self, name: &str, user: &User) -> Result<App, DomainError> {
        let not_found = || DomainError::not_found(format!("App '{}' not found", name));

        let app_name = AppName::new(name).map_err(|_| not_found())?;
        let app = self.apps.get(&app_name).await?.ok_or_else(not_found)?;

        let member_teams = self.member_teams(user).await?;

        if !app.grants_access(user.email(), &member_teams) {
            debug!(app = %app.name(), user = %user.email(), "Access denied");
            return Err(DomainError::forbidden(format!(
                "User '{}' does not have access to app '{}'",
                user.email(),
                app.name()
            )));
        }

        Ok(app)
    }
}
