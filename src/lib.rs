//! PMP App Platform
//!
//! Lifecycle management and team-based access control for hosted apps:
//! - Apps owned by teams, with at least one owning team at all times
//! - Ownership changes propagated to the repository directory service
//! - Commands and environment reads forwarded to each app's backing unit

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use api::state::AppState;
use crate::config::{AuthConfig, RepositoryConfig, StorageSettings, UnitsConfig};
use domain::{App, RepositoryDirectory, RepositoryLocator, Team, UnitExecutor};
use infrastructure::app::{AccessControl, AppService, StorageAppRepository};
use infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use infrastructure::repository_directory::{
    ChangePropagator, HttpRepositoryDirectory, HttpRepositoryDirectoryConfig,
    InMemoryRepositoryDirectory,
};
use infrastructure::storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType};
use infrastructure::team::{load_teams_file, seed_teams, StorageTeamRepository};
use infrastructure::unit::{ProcessUnitExecutor, ProcessUnitExecutorConfig, UnitGateway};

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const TOKEN_EXPIRATION_HOURS: u64 = 24;

/// Create application state from the layered configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::load()?;
    create_app_state_with_config(&config).await
}

/// Create application state with every collaborator chosen by `config`
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = storage_config(&config.storage)?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let storage = StorageFactory::connect(&storage_config).await?;
    let teams = Arc::new(StorageTeamRepository::new(
        storage.create::<Team>("teams").await?,
    ));
    let apps = Arc::new(StorageAppRepository::new(
        storage.create::<App>("apps").await?,
    ));

    if let Some(path) = &config.storage.teams_file {
        let file = load_teams_file(path).await?;
        let seeded = seed_teams(teams.as_ref(), file).await?;
        info!(path = %path, seeded, "Loaded teams file");
    }

    Ok(build_app_state(
        storage,
        AccessControl::new(apps, teams),
        repository_directory(&config.repository)?,
        unit_executor(&config.units),
        jwt_service(&config.auth),
        RepositoryLocator::new(config.repository.git_host.clone()),
    ))
}

/// Assemble the services from already constructed collaborators
pub fn build_app_state(
    storage: StorageFactory,
    access: AccessControl<StorageAppRepository, StorageTeamRepository>,
    directory: Arc<dyn RepositoryDirectory>,
    executor: Arc<dyn UnitExecutor>,
    jwt_service: Arc<dyn JwtGenerator>,
    locator: RepositoryLocator,
) -> AppState {
    let app_service = AppService::new(
        access.clone(),
        ChangePropagator::new(directory),
        locator.clone(),
    );
    let unit_service = UnitGateway::new(access, executor, locator);

    AppState {
        app_service: Arc::new(app_service),
        unit_service: Arc::new(unit_service),
        jwt_service,
        storage,
    }
}

fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    match settings.backend.parse::<StorageType>()? {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
                })?;

            Ok(StorageConfig::Postgres(PostgresConfig::new(url)))
        }
    }
}

fn repository_directory(config: &RepositoryConfig) -> anyhow::Result<Arc<dyn RepositoryDirectory>> {
    match &config.directory_url {
        Some(url) => {
            info!(url = %url, "Using repository directory service");
            let directory = HttpRepositoryDirectory::new(
                HttpRepositoryDirectoryConfig::new(url.clone())
                    .with_timeout(Duration::from_secs(config.timeout_secs)),
            )?;
            Ok(Arc::new(directory))
        }
        None => {
            warn!("No repository directory configured, ownership changes are recorded locally");
            Ok(Arc::new(InMemoryRepositoryDirectory::new()))
        }
    }
}

fn unit_executor(config: &UnitsConfig) -> Arc<dyn UnitExecutor> {
    Arc::new(ProcessUnitExecutor::new(ProcessUnitExecutorConfig {
        program: config.program.clone(),
        args: config.args.clone(),
        timeout: Duration::from_secs(config.timeout_secs),
    }))
}

fn jwt_service(config: &AuthConfig) -> Arc<dyn JwtGenerator> {
    if config.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using the default JWT secret, set APP__AUTH__JWT_SECRET in production");
    }

    Arc::new(JwtService::new(JwtConfig::new(
        config.jwt_secret.clone(),
        TOKEN_EXPIRATION_HOURS,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults_to_memory() {
        let config = storage_config(&StorageSettings::default()).unwrap();

        assert_eq!(config.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_storage_config_postgres_uses_configured_url() {
        let settings = StorageSettings {
            backend: "postgres".to_string(),
            database_url: Some("postgres://db/apps".to_string()),
            teams_file: None,
        };

        match storage_config(&settings).unwrap() {
            StorageConfig::Postgres(pg) => assert_eq!(pg.url, "postgres://db/apps"),
            other => panic!("unexpected storage config: {:?}", other),
        }
    }

    #[test]
    fn test_storage_config_rejects_unknown_backend() {
        let settings = StorageSettings {
            backend: "redis".to_string(),
            ..Default::default()
        };

        assert!(storage_config(&settings).is_err());
    }

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let state = create_app_state_with_config(&AppConfig::default())
            .await
            .unwrap();

        assert_eq!(state.storage.storage_type(), StorageType::InMemory);
        assert!(state.storage.ping().await.is_ok());
    }
}
