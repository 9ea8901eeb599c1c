//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Mutation, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Useful for testing and development. Data is lost when the process terminates.
/// Every write, including [`Storage::modify`], happens under a single write
/// lock, which makes conditional updates atomic.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

fn read_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire write lock: {}", e))
}

/// Check whether the array-valued `field` of `entity` holds any of `values`
fn field_contains_any<E: StorageEntity>(
    entity: &E,
    field: &str,
    values: &[String],
) -> Result<bool, DomainError> {
    let json = serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))?;

    let contains = json
        .get(field)
        .and_then(|v| v.as_array())
        .is_some_and(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .any(|item| values.iter().any(|value| value == item))
        });

    Ok(contains)
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(read_lock_error)?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn find_containing(
        &self,
        field: &str,
        values: &[String],
    ) -> Result<Vec<E>, DomainError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let entities = self.entities.read().map_err(read_lock_error)?;
        let mut found = Vec::new();

        for entity in entities.values() {
            if field_contains_any(entity, field, values)? {
                found.push(entity.clone());
            }
        }

        Ok(found)
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(write_lock_error)?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn modify(&self, key: &E::Key, mutation: Mutation<E>) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(write_lock_error)?;

        let stored = entities.get_mut(key.as_str()).ok_or_else(|| {
            DomainError::not_found(format!("Entity with key '{}' not found", key.as_str()))
        })?;

        let mut candidate = stored.clone();
        mutation(&mut candidate)?;
        *stored = candidate.clone();

        Ok(candidate)
    }

    async fn delete(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let mut entities = self.entities.write().map_err(write_lock_error)?;

        Ok(entities.remove(key.as_str()))
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(read_lock_error)?;

        Ok(entities.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::team::{Team, TeamName};
    use crate::domain::user::UserEmail;

    fn team(name: &str, users: &[&str]) -> Team {
        users.iter().fold(Team::new(TeamName::new(name).unwrap()), |team, user| {
            team.with_user(UserEmail::new(*user).unwrap())
        })
    }

    fn key(name: &str) -> TeamName {
        TeamName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        storage.create(team("admin", &["a@example.com"])).await.unwrap();

        let result = storage.get(&key("admin")).await.unwrap().unwrap();
        assert_eq!(result.name().as_str(), "admin");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        storage.create(team("admin", &[])).await.unwrap();
        let result = storage.create(team("admin", &[])).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = InMemoryStorage::with_entities(vec![team("admin", &[])]);

        let removed = storage.delete(&key("admin")).await.unwrap().unwrap();
        assert_eq!(removed.name().as_str(), "admin");
        assert!(!storage.exists(&key("admin")).await.unwrap());
        assert!(storage.delete(&key("admin")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_containing() {
        let storage = InMemoryStorage::with_entities(vec![
            team("admin", &["a@example.com", "b@example.com"]),
            team("ops", &["b@example.com"]),
            team("qa", &["c@example.com"]),
        ]);

        let mut found: Vec<String> = storage
            .find_containing("users", &["b@example.com".to_string()])
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name().to_string())
            .collect();
        found.sort();

        assert_eq!(found, vec!["admin", "ops"]);
    }

    #[tokio::test]
    async fn test_find_containing_no_values_or_unknown_field() {
        let storage = InMemoryStorage::with_entities(vec![team("admin", &["a@example.com"])]);

        assert!(storage.find_containing("users", &[]).await.unwrap().is_empty());
        assert!(storage
            .find_containing("missing", &["a@example.com".to_string()])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_modify_applies_mutation() {
        let storage = InMemoryStorage::with_entities(vec![team("admin", &[])]);

        let updated = storage
            .modify(
                &key("admin"),
                Box::new(|t: &mut Team| {
                    *t = t.clone().with_user(UserEmail::new("a@example.com").unwrap());
                    Ok(())
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.users().count(), 1);
        let stored = storage.get(&key("admin")).await.unwrap().unwrap();
        assert_eq!(stored.users().count(), 1);
    }

    #[tokio::test]
    async fn test_modify_failure_leaves_entity_untouched() {
        let storage = InMemoryStorage::with_entities(vec![team("admin", &[])]);

        let result = storage
            .modify(
                &key("admin"),
                Box::new(|t: &mut Team| {
                    *t = t.clone().with_user(UserEmail::new("a@example.com").unwrap());
                    Err(DomainError::conflict("rejected"))
                }),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        let stored = storage.get(&key("admin")).await.unwrap().unwrap();
        assert_eq!(stored.users().count(), 0);
    }

    #[tokio::test]
    async fn test_modify_missing_key() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        let result = storage.modify(&key("admin"), Box::new(|_| Ok(()))).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_modifies_are_serialized() {
        let storage = Arc::new(InMemoryStorage::with_entities(vec![team("admin", &[])]));
        let mut handles = Vec::new();

        for i in 0..20 {
            let storage = Arc::clone(&storage);
            handles.push(tokio::spawn(async move {
                let email = UserEmail::new(format!("user{}@example.com", i)).unwrap();
                storage
                    .modify(
                        &TeamName::new("admin").unwrap(),
                        Box::new(move |t: &mut Team| {
                            *t = t.clone().with_user(email);
                            Ok(())
                        }),
                    )
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = storage.get(&key("admin")).await.unwrap().unwrap();
        assert_eq!(stored.users().count(), 20);
    }

    #[tokio::test]
    async fn test_delete_returns_latest_modification() {
        let storage = InMemoryStorage::with_entities(vec![team("admin", &[])]);
        storage
            .modify(
                &key("admin"),
                Box::new(|t: &mut Team| {
                    *t = t.clone().with_user(UserEmail::new("a@example.com").unwrap());
                    Ok(())
                }),
            )
            .await
            .unwrap();

        let removed = storage.delete(&key("admin")).await.unwrap().unwrap();

        assert_eq!(removed.users().count(), 1);
    }
}
