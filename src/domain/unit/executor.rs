//! Unit execution channel abstraction

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::domain::app::AppName;
use crate::domain::DomainError;

/// Handle to the unit an app runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    app: AppName,
    machine: String,
}

impl Unit {
    pub fn new(app: AppName, machine: impl Into<String>) -> Self {
        Self {
            app,
            machine: machine.into(),
        }
    }

    pub fn app(&self) -> &AppName {
        &self.app
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }
}

/// Transport that runs a shell command on a unit
///
/// Commands are not assumed idempotent; implementations must not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UnitExecutor: Send + Sync + std::fmt::Debug {
    /// Run `command` on `unit` and return its raw output
    async fn command(&self, unit: &Unit, command: &str) -> Result<Vec<u8>, DomainError>;
}
