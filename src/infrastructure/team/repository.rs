//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamName, TeamRepository};
use crate::domain::user::UserEmail;
use crate::domain::DomainError;

/// Field of the stored team document holding member emails
const MEMBERS_FIELD: &str = "users";

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
        self.storage.get(name).await
    }

    async fn find_by_member(&self, email: &UserEmail) -> Result<Vec<Team>, DomainError> {
        let mut teams = self
            .storage
            .find_containing(MEMBERS_FIELD, &[email.as_str().to_string()])
            .await?;

        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.create(team).await
    }

    async fn exists(&self, name: &TeamName) -> Result<bool, DomainError> {
        self.storage.exists(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageTeamRepository {
        StorageTeamRepository::new(Arc::new(InMemoryStorage::<Team>::new()))
    }

    fn email(value: &str) -> UserEmail {
        UserEmail::new(value).unwrap()
    }

    fn team(name: &str, users: &[&str]) -> Team {
        users.iter().fold(Team::new(TeamName::new(name).unwrap()), |team, user| {
            team.with_user(email(user))
        })
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = create_repo();

        repo.create(team("admin", &["alice@example.com"])).await.unwrap();

        let retrieved = repo.get(&TeamName::new("admin").unwrap()).await.unwrap().unwrap();
        assert!(retrieved.contains_user(&email("alice@example.com")));
        assert!(repo.exists(&TeamName::new("admin").unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let repo = create_repo();

        repo.create(team("admin", &[])).await.unwrap();
        let result = repo.create(team("admin", &["bob@example.com"])).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_by_member_sorted() {
        let repo = create_repo();
        repo.create(team("qa", &["alice@example.com"])).await.unwrap();
        repo.create(team("admin", &["alice@example.com", "bob@example.com"]))
            .await
            .unwrap();
        repo.create(team("ops", &["bob@example.com"])).await.unwrap();

        let names: Vec<String> = repo
            .find_by_member(&email("alice@example.com"))
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();

        assert_eq!(names, vec!["admin", "qa"]);
    }

    #[tokio::test]
    async fn test_find_by_member_without_teams() {
        let repo = create_repo();
        repo.create(team("admin", &["alice@example.com"])).await.unwrap();

        let teams = repo.find_by_member(&email("nobody@example.com")).await.unwrap();

        assert!(teams.is_empty());
    }
}
