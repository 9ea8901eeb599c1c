//! Unit execution adapters and the command gateway

mod gateway;
mod process;

pub use gateway::UnitGateway;
pub use process::{ProcessUnitExecutor, ProcessUnitExecutorConfig};
