//! App entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::{validate_app_name, AppValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::{Team, TeamName};
use crate::domain::unit::Unit;
use crate::domain::user::UserEmail;
use crate::domain::DomainError;

/// App name - globally unique identifier of an app
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Create a new AppName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, AppValidationError> {
        let name = name.into();
        validate_app_name(&name)?;
        Ok(Self(name))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AppName {
    type Error = AppValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppName> for String {
    fn from(name: AppName) -> Self {
        name.0
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for AppName {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rule violations when changing an app's team set
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamAccessError {
    #[error("An app must be created with at least one team")]
    NoTeams,

    #[error("Team '{0}' already has access to this app")]
    AlreadyGranted(TeamName),

    #[error("Team '{0}' does not have access to this app")]
    NotGranted(TeamName),

    #[error(
        "Cannot revoke access from team '{0}': it is the only team with access to the app, and an app cannot be orphaned"
    )]
    WouldOrphan(TeamName),
}

impl From<TeamAccessError> for DomainError {
    fn from(err: TeamAccessError) -> Self {
        match err {
            TeamAccessError::AlreadyGranted(_) => DomainError::conflict(err.to_string()),
            TeamAccessError::NotGranted(_) => DomainError::not_found(err.to_string()),
            TeamAccessError::NoTeams | TeamAccessError::WouldOrphan(_) => {
                DomainError::invariant_violation(err.to_string())
            }
        }
    }
}

/// App entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    name: AppName,
    /// Platform label chosen at creation (e.g. "python")
    #[serde(default)]
    framework: String,
    /// Teams with access; never empty
    teams: BTreeSet<TeamName>,
    /// Backing unit host
    machine: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl App {
    /// Create a new app owned by the given teams
    pub fn new(
        name: AppName,
        framework: impl Into<String>,
        teams: impl IntoIterator<Item = TeamName>,
        machine: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let teams: BTreeSet<TeamName> = teams.into_iter().collect();

        if teams.is_empty() {
            return Err(TeamAccessError::NoTeams.into());
        }

        let machine = machine.into();

        if machine.trim().is_empty() {
            return Err(DomainError::bad_input(AppValidationError::EmptyMachine.to_string()));
        }

        let now = Utc::now();

        Ok(Self {
            name,
            framework: framework.into(),
            teams,
            machine,
            created_at: now,
            updated_at: now,
        })
    }

    /// Default backing unit for an app that was not given one explicitly
    pub fn default_machine(name: &AppName) -> String {
        format!("{}/0", name)
    }

    // Getters

    pub fn name(&self) -> &AppName {
        &self.name
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }

    pub fn teams(&self) -> impl ExactSizeIterator<Item = &TeamName> {
        self.teams.iter()
    }

    pub fn has_team(&self, team: &TeamName) -> bool {
        self.teams.contains(team)
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The unit this app runs on
    pub fn unit(&self) -> Unit {
        Unit::new(self.name.clone(), self.machine.clone())
    }

    /// Check whether `email` has derived access through any of `member_teams`
    ///
    /// `member_teams` are the teams the user belongs to; access exists iff one
    /// of them is in this app's team set.
    pub fn grants_access<'a>(
        &self,
        email: &UserEmail,
        member_teams: impl IntoIterator<Item = &'a Team>,
    ) -> bool {
        member_teams
            .into_iter()
            .any(|team| team.contains_user(email) && self.teams.contains(team.name()))
    }

    // Mutators

    /// Add a team to the app's team set
    pub fn grant(&mut self, team: TeamName) -> Result<(), TeamAccessError> {
        if self.teams.contains(&team) {
            return Err(TeamAccessError::AlreadyGranted(team));
        }

        self.teams.insert(team);
        self.touch();
        Ok(())
    }

    /// Remove a team from the app's team set
    ///
    /// The cardinality rule is evaluated on the whole set before the named
    /// team's membership, so a single-team app always reports `WouldOrphan`.
    pub fn revoke(&mut self, team: &TeamName) -> Result<(), TeamAccessError> {
        if self.teams.len() <= 1 {
            return Err(TeamAccessError::WouldOrphan(team.clone()));
        }

        if !self.teams.remove(team) {
            return Err(TeamAccessError::NotGranted(team.clone()));
        }

        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for App {
    type Key = AppName;

    fn key(&self) -> &Self::Key {
        &self.name
    }
}
