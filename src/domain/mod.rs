//! Domain layer - Core business logic and entities

pub mod app;
pub mod env;
pub mod error;
pub mod repository_directory;
pub mod storage;
pub mod team;
pub mod unit;
pub mod user;

pub use app::{App, AppName, AppRepository, TeamAccessError};
pub use error::DomainError;
pub use repository_directory::{ChangeKind, RepositoryChange, RepositoryDirectory, RepositoryLocator};
pub use storage::{Mutation, Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamName, TeamRepository};
pub use unit::{Unit, UnitExecutor};
pub use user::{User, UserEmail};
