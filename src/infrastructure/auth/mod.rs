//! Authentication infrastructure module
//!
//! Requests carry a bearer JWT whose subject is the caller's email.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
