//! Team entity and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserEmail;

/// Team name - the team's unique identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamName(String);

impl TeamName {
    /// Create a new TeamName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        Ok(Self(name))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamName {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamName> for String {
    fn from(name: TeamName) -> Self {
        name.0
    }
}

impl std::fmt::Display for TeamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamName {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Team entity
///
/// Membership is stored by value as user emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    name: TeamName,
    #[serde(default)]
    users: BTreeSet<UserEmail>,
}

impl Team {
    /// Create a new team without members
    pub fn new(name: TeamName) -> Self {
        Self {
            name,
            users: BTreeSet::new(),
        }
    }

    /// Add a member (builder pattern)
    pub fn with_user(mut self, email: UserEmail) -> Self {
        self.users.insert(email);
        self
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn users(&self) -> impl Iterator<Item = &UserEmail> {
        self.users.iter()
    }

    /// Check whether the given user is a member of this team
    pub fn contains_user(&self, email: &UserEmail) -> bool {
        self.users.contains(email)
    }
}

impl StorageEntity for Team {
    type Key = TeamName;

    fn key(&self) -> &Self::Key {
        &self.name
    }
}
