//! Infrastructure layer - External service implementations

pub mod app;
pub mod auth;
pub mod observability;
pub mod repository_directory;
pub mod storage;
pub mod team;
pub mod unit;
