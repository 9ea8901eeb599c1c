//! In-memory repository directory that records notices

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::repository_directory::{RepositoryChange, RepositoryDirectory};
use crate::domain::DomainError;

/// Records every delivered notice
///
/// Used when no directory service is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryRepositoryDirectory {
    changes: RwLock<Vec<RepositoryChange>>,
}

impl InMemoryRepositoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices delivered so far, oldest first
    pub fn changes(&self) -> Vec<RepositoryChange> {
        self.changes
            .read()
            .map(|changes| changes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RepositoryDirectory for InMemoryRepositoryDirectory {
    async fn notify(&self, change: &RepositoryChange) -> Result<(), DomainError> {
        self.changes
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?
            .push(change.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::app::AppName;
    use crate::domain::team::TeamName;

    #[tokio::test]
    async fn test_records_changes_in_order() {
        let directory = InMemoryRepositoryDirectory::new();
        let app = AppName::new("blog").unwrap();

        directory
            .notify(&RepositoryChange::add(TeamName::new("admin").unwrap(), app.clone()))
            .await
            .unwrap();
        directory
            .notify(&RepositoryChange::remove(TeamName::new("ops").unwrap(), app))
            .await
            .unwrap();

        let changes = directory.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].team.as_str(), "admin");
        assert_eq!(changes[1].kind.as_str(), "remove");
    }
}
