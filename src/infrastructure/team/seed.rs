//! Seeding teams from a TOML file
//!
//! Team lifecycle is external to the platform. In development the store is
//! populated from a file such as:
//!
//! ```toml
//! [[teams]]
//! name = "admin"
//! users = ["alice@example.com"]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::team::{Team, TeamRepository};
use crate::domain::DomainError;

/// Contents of a teams file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsFile {
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl TeamsFile {
    pub fn parse(contents: &str) -> Result<Self, DomainError> {
        toml::from_str(contents)
            .map_err(|e| DomainError::bad_input(format!("Invalid teams file: {}", e)))
    }
}

/// Read and parse a teams file
pub async fn load_teams_file(path: impl AsRef<Path>) -> Result<TeamsFile, DomainError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::internal(format!(
            "Failed to read teams file '{}': {}",
            path.display(),
            e
        ))
    })?;

    TeamsFile::parse(&contents)
}

/// Create every team from `file` that does not exist yet
///
/// Returns the number of teams created.
pub async fn seed_teams<R>(repository: &R, file: TeamsFile) -> Result<usize, DomainError>
where
    R: TeamRepository + ?Sized,
{
    let mut created = 0;

    for team in file.teams {
        if repository.exists(team.name()).await? {
            debug!(team = %team.name(), "Team already present, skipping");
            continue;
        }

        repository.create(team).await?;
        created += 1;
    }

    info!(created, "Seeded teams");
    Ok(created)
}
