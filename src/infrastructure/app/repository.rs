//! Storage-backed app repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::app::{App, AppName, AppRepository};
use crate::domain::storage::Storage;
use crate::domain::team::TeamName;
use crate::domain::DomainError;

/// Field of the stored app document holding team names
const TEAMS_FIELD: &str = "teams";

/// Storage-backed implementation of AppRepository
///
/// Team-set changes go through [`Storage::modify`] so the app's own rules
/// are checked against the stored value under the backend's lock.
#[derive(Debug)]
pub struct StorageAppRepository {
    storage: Arc<dyn Storage<App>>,
}

impl StorageAppRepository {
    pub fn new(storage: Arc<dyn Storage<App>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AppRepository for StorageAppRepository {
    async fn get(&self, name: &AppName) -> Result<Option<App>, DomainError> {
        self.storage.get(name).await
    }

    async fn find_by_teams(&self, teams: &[TeamName]) -> Result<Vec<App>, DomainError> {
        let names: Vec<String> = teams.iter().map(|t| t.as_str().to_string()).collect();

        let mut apps = self.storage.find_containing(TEAMS_FIELD, &names).await?;
        apps.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(apps)
    }

    async fn create(&self, app: App) -> Result<App, DomainError> {
        let name = app.name().clone();

        self.storage.create(app).await.map_err(|e| match e {
            DomainError::Conflict { .. } => {
                DomainError::conflict(format!("App '{}' already exists", name))
            }
            other => other,
        })
    }

    async fn delete(&self, name: &AppName) -> Result<Option<App>, DomainError> {
        self.storage.delete(name).await
    }

    async fn grant_team(&self, name: &AppName, team: &TeamName) -> Result<App, DomainError> {
        let team = team.clone();

        self.storage
            .modify(
                name,
                Box::new(move |app: &mut App| app.grant(team).map_err(DomainError::from)),
            )
            .await
    }

    async fn revoke_team(&self, name: &AppName, team: &TeamName) -> Result<App, DomainError> {
        let team = team.clone();

        self.storage
            .modify(
                name,
                Box::new(move |app: &mut App| app.revoke(&team).map_err(DomainError::from)),
            )
            .await
    }
}
