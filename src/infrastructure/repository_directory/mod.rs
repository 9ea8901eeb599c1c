//! Repository directory adapters and change propagation

mod http;
mod in_memory;
mod propagator;

pub use http::{HttpRepositoryDirectory, HttpRepositoryDirectoryConfig};
pub use in_memory::InMemoryRepositoryDirectory;
pub use propagator::ChangePropagator;
