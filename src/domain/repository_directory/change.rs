//! Change notices sent to the repository directory

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::domain::app::AppName;
use crate::domain::team::TeamName;
use crate::domain::DomainError;

/// Direction of an access change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Add,
    Remove,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single team/app access change
///
/// Notices are idempotent: delivering the same `(kind, team, app)` twice has
/// the same effect as delivering it once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryChange {
    pub kind: ChangeKind,
    #[serde(rename = "group")]
    pub team: TeamName,
    #[serde(rename = "project")]
    pub app: AppName,
}

impl RepositoryChange {
    pub fn add(team: TeamName, app: AppName) -> Self {
        Self {
            kind: ChangeKind::Add,
            team,
            app,
        }
    }

    pub fn remove(team: TeamName, app: AppName) -> Self {
        Self {
            kind: ChangeKind::Remove,
            team,
            app,
        }
    }
}

/// Client of the repository directory service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryDirectory: Send + Sync + std::fmt::Debug {
    /// Deliver one change notice
    async fn notify(&self, change: &RepositoryChange) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_wire_format() {
        let change = RepositoryChange::add(
            TeamName::new("admin").unwrap(),
            AppName::new("blog").unwrap(),
        );

        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "add", "group": "admin", "project": "blog"})
        );
    }

    #[test]
    fn test_change_kind_display() {
        assert_eq!(ChangeKind::Add.to_string(), "add");
        assert_eq!(ChangeKind::Remove.to_string(), "remove");
    }

    #[test]
    fn test_remove_constructor() {
        let change = RepositoryChange::remove(
            TeamName::new("ops").unwrap(),
            AppName::new("blog").unwrap(),
        );
        assert_eq!(change.kind, ChangeKind::Remove);
        assert_eq!(change.team.as_str(), "ops");
    }
}
