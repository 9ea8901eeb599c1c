//! App infrastructure: persistence, access resolution and lifecycle

mod access;
mod repository;
mod service;

pub use access::AccessControl;
pub use repository::StorageAppRepository;
pub use service::{AppService, CreateAppRequest, CreatedApp};
