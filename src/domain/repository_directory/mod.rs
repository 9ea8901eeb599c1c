//! Repository directory domain
//!
//! The repository directory mirrors team/app access into version-control
//! ACLs. It is a separate system of record kept in sync by change notices.

mod change;
mod location;

pub use change::{ChangeKind, RepositoryChange, RepositoryDirectory};
pub use location::RepositoryLocator;

#[cfg(test)]
pub use change::MockRepositoryDirectory;
