//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// A conditional in-place change applied by [`Storage::modify`].
///
/// Returning an error aborts the change and nothing is written.
pub type Mutation<E> = Box<dyn FnOnce(&mut E) -> Result<(), DomainError> + Send + 'static>;

/// Generic storage trait for CRUD operations on any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves entities whose array-valued `field` contains any of `values`
    async fn find_containing(&self, field: &str, values: &[String])
        -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Applies `mutation` to the stored entity atomically with respect to
    /// every other `modify` or `delete` on the same key.
    ///
    /// Returns `NotFound` if the key does not exist, or the mutation's own
    /// error, in which case the stored entity is left untouched.
    async fn modify(&self, key: &E::Key, mutation: Mutation<E>) -> Result<E, DomainError>;

    /// Deletes an entity by its key, returning the removed entity if any
    async fn delete(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }
}
