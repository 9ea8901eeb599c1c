//! Unit domain - the runtime host backing an app

mod executor;

pub use executor::{Unit, UnitExecutor};

#[cfg(test)]
pub use executor::MockUnitExecutor;
