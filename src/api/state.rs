//! Application state for shared services

use std::sync::Arc;

use crate::domain::app::AppRepository;
use crate::domain::team::TeamRepository;
use crate::domain::user::User;
use crate::domain::{App, DomainError};
use crate::infrastructure::app::{AppService, CreateAppRequest, CreatedApp};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::storage::StorageFactory;
use crate::infrastructure::unit::UnitGateway;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub app_service: Arc<dyn AppServiceTrait>,
    pub unit_service: Arc<dyn UnitServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub storage: StorageFactory,
}

/// App lifecycle and access control operations
#[async_trait::async_trait]
pub trait AppServiceTrait: Send + Sync {
    async fn create(&self, request: CreateAppRequest, user: &User)
        -> Result<CreatedApp, DomainError>;
    async fn info(&self, name: &str, user: &User) -> Result<App, DomainError>;
    async fn list(&self, user: &User) -> Result<Vec<App>, DomainError>;
    async fn destroy(&self, name: &str, user: &User) -> Result<(), DomainError>;
    async fn grant(&self, name: &str, team: &str, user: &User) -> Result<App, DomainError>;
    async fn revoke(&self, name: &str, team: &str, user: &User) -> Result<App, DomainError>;
    async fn resync(&self, name: &str, user: &User) -> Result<(), DomainError>;
}

/// Operations that reach an app's backing unit
#[async_trait::async_trait]
pub trait UnitServiceTrait: Send + Sync {
    async fn run_command(&self, name: &str, user: &User, command: &str)
        -> Result<Vec<u8>, DomainError>;
    async fn get_env(&self, name: &str, user: &User, names: &[u8])
        -> Result<Vec<u8>, DomainError>;
    async fn clone_repository(&self, name: &str, user: &User) -> Result<Vec<u8>, DomainError>;
}

#[async_trait::async_trait]
impl<A, T> AppServiceTrait for AppService<A, T>
where
    A: AppRepository + 'static,
    T: TeamRepository + 'static,
{
    async fn create(
        &self,
        request: CreateAppRequest,
        user: &User,
    ) -> Result<CreatedApp, DomainError> {
        AppService::create(self, request, user).await
    }

    async fn info(&self, name: &str, user: &User) -> Result<App, DomainError> {
        AppService::info(self, name, user).await
    }

    async fn list(&self, user: &User) -> Result<Vec<App>, DomainError> {
        AppService::list(self, user).await
    }

    async fn destroy(&self, name: &str, user: &User) -> Result<(), DomainError> {
        AppService::destroy(self, name, user).await
    }

    async fn grant(&self, name: &str, team: &str, user: &User) -> Result<App, DomainError> {
        AppService::grant(self, name, team, user).await
    }

    async fn revoke(&self, name: &str, team: &str, user: &User) -> Result<App, DomainError> {
        AppService::revoke(self, name, team, user).await
    }

    async fn resync(&self, name: &str, user: &User) -> Result<(), DomainError> {
        AppService::resync(self, name, user).await
    }
}

#[async_trait::async_trait]
impl<A, T> UnitServiceTrait for UnitGateway<A, T>
where
    A: AppRepository + 'static,
    T: TeamRepository + 'static,
{
    async fn run_command(
        &self,
        name: &str,
        user: &User,
        command: &str,
    ) -> Result<Vec<u8>, DomainError> {
        UnitGateway::run_command(self, name, user, command).await
    }

    async fn get_env(
        &self,
        name: &str,
        user: &User,
        names: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        UnitGateway::get_env(self, name, user, names).await
    }

    async fn clone_repository(&self, name: &str, user: &User) -> Result<Vec<u8>, DomainError> {
        UnitGateway::clone_repository(self, name, user).await
    }
}
