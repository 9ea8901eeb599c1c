//! Change propagation client

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::repository_directory::{RepositoryChange, RepositoryDirectory};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_repository_change;

/// Delivers the notices produced by a committed mutation
///
/// Every notice is attempted even if an earlier one fails. Failures are not
/// retried; they are reported together as one `Upstream` error whose message
/// states that the change itself was committed.
#[derive(Debug, Clone)]
pub struct ChangePropagator {
    directory: Arc<dyn RepositoryDirectory>,
}

impl ChangePropagator {
    pub fn new(directory: Arc<dyn RepositoryDirectory>) -> Self {
        Self { directory }
    }

    pub async fn propagate(&self, changes: &[RepositoryChange]) -> Result<(), DomainError> {
        let mut failures = Vec::new();
        let mut timed_out = false;

        for change in changes {
            match self.directory.notify(change).await {
                Ok(()) => {
                    record_repository_change(change.kind.as_str(), true);
                    info!(kind = %change.kind, team = %change.team, app = %change.app, "Propagated change");
                }
                Err(e) => {
                    record_repository_change(change.kind.as_str(), false);
                    warn!(kind = %change.kind, team = %change.team, app = %change.app, error = %e, "Failed to propagate change");

                    timed_out |= matches!(e, DomainError::Upstream { timed_out: true, .. });
                    failures.push(format!("{} {} ({})", change.kind, change.team, e));
                }
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let message = format!(
            "Change committed but the repository directory was not updated: {}",
            failures.join("; ")
        );

        Err(DomainError::Upstream {
            service: "repository_directory".to_string(),
            message,
            timed_out,
        })
    }
}
