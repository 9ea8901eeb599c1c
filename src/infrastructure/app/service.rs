//! App lifecycle service

use tracing::{debug, info};

use crate::domain::app::{App, AppName, AppRepository};
use crate::domain::repository_directory::{RepositoryChange, RepositoryLocator};
use crate::domain::team::{TeamName, TeamRepository};
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::repository_directory::ChangePropagator;

use super::access::AccessControl;

/// Request for creating a new app
#[derive(Debug, Clone)]
pub struct CreateAppRequest {
    pub name: String,
    pub framework: String,
}

/// Result of a successful create
#[derive(Debug, Clone)]
pub struct CreatedApp {
    pub app: App,
    pub repository_url: String,
}

/// Owns app creation, destruction and team grants
///
/// Every state change is committed before its notices are propagated. A
/// propagation failure is returned to the caller but never undoes the change.
#[derive(Debug)]
pub struct AppService<A: AppRepository, T: TeamRepository> {
    access: AccessControl<A, T>,
    propagator: ChangePropagator,
    locator: RepositoryLocator,
}

/// Grant and revoke report a denied caller as unauthorized
fn deny_as_unauthorized(err: DomainError) -> DomainError {
    match err {
        DomainError::Forbidden { message } => DomainError::unauthorized(message),
        other => other,
    }
}

impl<A: AppRepository, T: TeamRepository> AppService<A, T> {
    pub fn new(
        access: AccessControl<A, T>,
        propagator: ChangePropagator,
        locator: RepositoryLocator,
    ) -> Self {
        Self {
            access,
            propagator,
            locator,
        }
    }

    /// Create an app owned by every team the requester belongs to
    pub async fn create(
        &self,
        request: CreateAppRequest,
        requester: &User,
    ) -> Result<CreatedApp, DomainError> {
        info!(name = %request.name, user = %requester.email(), "Creating app");

        let name =
            AppName::new(request.name).map_err(|e| DomainError::bad_input(e.to_string()))?;

        let member_teams = self.access.member_teams(requester).await?;

        if member_teams.is_empty() {
            return Err(DomainError::forbidden(format!(
                "User '{}' is not a member of any team",
                requester.email()
            )));
        }

        let machine = App::default_machine(&name);
        let app = App::new(
            name,
            request.framework,
            member_teams.into_iter().map(|team| team.name().clone()),
            machine,
        )?;

        let app = self.access.apps().create(app).await?;

        let changes: Vec<RepositoryChange> = app
            .teams()
            .map(|team| RepositoryChange::add(team.clone(), app.name().clone()))
            .collect();
        self.propagator.propagate(&changes).await?;

        let repository_url = self.locator.url(app.name());
        info!(app = %app.name(), teams = app.teams().len(), "App created");

        Ok(CreatedApp {
            app,
            repository_url,
        })
    }

    /// Get an app the requester has access to
    pub async fn info(&self, name: &str, requester: &User) -> Result<App, DomainError> {
        self.access.resolve(name, requester).await
    }

    /// Every app the requester has access to, sorted by name
    pub async fn list(&self, requester: &User) -> Result<Vec<App>, DomainError> {
        let team_names: Vec<TeamName> = self
            .access
            .member_teams(requester)
            .await?
            .into_iter()
            .map(|team| team.name().clone())
            .collect();

        if team_names.is_empty() {
            return Ok(Vec::new());
        }

        self.access.apps().find_by_teams(&team_names).await
    }

    /// Delete an app and withdraw every team's repository access
    pub async fn destroy(&self, name: &str, requester: &User) -> Result<(), DomainError> {
        let app = self.access.resolve(name, requester).await?;

        info!(app = %app.name(), user = %requester.email(), "Destroying app");

        // Notices follow the record as deleted, not the one access was checked on
        let removed = self
            .access
            .apps()
            .delete(app.name())
            .await?
            .ok_or_else(|| DomainError::not_found(format!("App '{}' not found", name)))?;

        let changes: Vec<RepositoryChange> = removed
            .teams()
            .map(|team| RepositoryChange::remove(team.clone(), removed.name().clone()))
            .collect();

        self.propagator.propagate(&changes).await
    }

    /// Give `team` access to the app
    pub async fn grant(
        &self,
        name: &str,
        team: &str,
        requester: &User,
    ) -> Result<App, DomainError> {
        let app = self
            .access
            .resolve(name, requester)
            .await
            .map_err(deny_as_unauthorized)?;
        let team = self.existing_team(team).await?;

        let app = self.access.apps().grant_team(app.name(), &team).await?;
        info!(app = %app.name(), team = %team, "Granted team access");

        self.propagator
            .propagate(&[RepositoryChange::add(team, app.name().clone())])
            .await?;

        Ok(app)
    }

    /// Take access away from `team`, unless it is the app's only team
    pub async fn revoke(
        &self,
        name: &str,
        team: &str,
        requester: &User,
    ) -> Result<App, DomainError> {
        let app = self
            .access
            .resolve(name, requester)
            .await
            .map_err(deny_as_unauthorized)?;
        let team = self.existing_team(team).await?;

        let app = self.access.apps().revoke_team(app.name(), &team).await?;
        info!(app = %app.name(), team = %team, "Revoked team access");

        self.propagator
            .propagate(&[RepositoryChange::remove(team, app.name().clone())])
            .await?;

        Ok(app)
    }

    /// Re-send an add notice for every current team of the app
    pub async fn resync(&self, name: &str, requester: &User) -> Result<(), DomainError> {
        let app = self.access.resolve(name, requester).await?;

        debug!(app = %app.name(), "Resynchronizing repository directory");

        let changes: Vec<RepositoryChange> = app
            .teams()
            .map(|team| RepositoryChange::add(team.clone(), app.name().clone()))
            .collect();

        self.propagator.propagate(&changes).await
    }

    async fn existing_team(&self, team: &str) -> Result<TeamName, DomainError> {
        let not_found = || DomainError::not_found(format!("Team '{}' not found", team));

        let name = TeamName::new(team).map_err(|_| not_found())?;

        if !self.access.teams().exists(&name).await? {
            return Err(not_found());
        }

        Ok(name)
    }
}
