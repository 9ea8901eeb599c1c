//! Unit executor that shells out to a transport CLI

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::unit::{Unit, UnitExecutor};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_unit_command, UnitCommandOutcome};

const SERVICE: &str = "unit";

/// How to reach a unit
///
/// The command line is `<program> <args...> <machine> <command>`.
#[derive(Debug, Clone)]
pub struct ProcessUnitExecutorConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for ProcessUnitExecutorConfig {
    fn default() -> Self {
        Self {
            program: "juju".to_string(),
            args: vec![
                "ssh".to_string(),
                "-o".to_string(),
                "StrictHostKeyChecking no".to_string(),
                "-q".to_string(),
            ],
            timeout: Duration::from_secs(30),
        }
    }
}

/// Runs unit commands as child processes
///
/// The child is killed when the deadline expires. Stdout is returned on a
/// zero exit status; otherwise stderr becomes the error message.
#[derive(Debug, Clone)]
pub struct ProcessUnitExecutor {
    config: ProcessUnitExecutorConfig,
}

impl ProcessUnitExecutor {
    pub fn new(config: ProcessUnitExecutorConfig) -> Self {
        Self { config }
    }

    async fn run(&self, unit: &Unit, command: &str) -> Result<Vec<u8>, DomainError> {
        let program = &self.config.program;

        let mut child = Command::new(program)
            .args(&self.config.args)
            .arg(unit.machine())
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DomainError::upstream(SERVICE, format!("Failed to spawn {}: {}", program, e)))?;

        let stdout_handle = child.stdout.take();
        let stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    read_stream(stdout_handle, "stdout"),
                    read_stream(stderr_handle, "stderr"),
                );

                let status = status.map_err(|e| {
                    DomainError::upstream(SERVICE, format!("Failed waiting for {}: {}", program, e))
                })?;
                let (stdout, stderr) = (stdout?, stderr?);

                if status.success() {
                    Ok(stdout)
                } else {
                    Err(DomainError::upstream(
                        SERVICE,
                        format!(
                            "Command on '{}' failed ({}): {}",
                            unit.machine(),
                            status,
                            String::from_utf8_lossy(&stderr).trim()
                        ),
                    ))
                }
            } => result,
            () = tokio::time::sleep(self.config.timeout) => {
                let _ = child.kill().await;
                Err(DomainError::upstream_timeout(
                    SERVICE,
                    format!(
                        "Command on '{}' timed out after {}s",
                        unit.machine(),
                        self.config.timeout.as_secs()
                    ),
                ))
            }
        }
    }
}

/// Read a child's output pipe to the end
///
/// A failed read is an error rather than truncated output.
async fn read_stream<R>(handle: Option<R>, name: &str) -> Result<Vec<u8>, DomainError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();

    if let Some(mut handle) = handle {
        handle.read_to_end(&mut buf).await.map_err(|e| {
            DomainError::upstream(SERVICE, format!("Failed to read {}: {}", name, e))
        })?;
    }

    Ok(buf)
}

#[async_trait]
impl UnitExecutor for ProcessUnitExecutor {
    async fn command(&self, unit: &Unit, command: &str) -> Result<Vec<u8>, DomainError> {
        debug!(app = %unit.app(), machine = %unit.machine(), "Running unit command");

        let start = Instant::now();
        let result = self.run(unit, command).await;

        let outcome = match &result {
            Ok(_) => UnitCommandOutcome::Success,
            Err(DomainError::Upstream { timed_out: true, .. }) => UnitCommandOutcome::Timeout,
            Err(_) => UnitCommandOutcome::Failure,
        };
        record_unit_command(outcome, start.elapsed());

        if let Err(e) = &result {
            warn!(app = %unit.app(), machine = %unit.machine(), error = %e, "Unit command failed");
        }

        result
    }
}
