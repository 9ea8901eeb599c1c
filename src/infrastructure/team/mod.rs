//! Team infrastructure implementations

mod repository;
mod seed;

pub use repository::StorageTeamRepository;
pub use seed::{load_teams_file, seed_teams, TeamsFile};
