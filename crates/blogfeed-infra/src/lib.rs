//! # BlogFeed Infrastructure
//!
//! Concrete implementations of the ports defined in `blogfeed-core`.
//! This crate contains the database, file storage and token integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory repositories only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT bearer token verification

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory / local
pub use database::{DatabaseConfig, DatabaseConnections, InMemoryDatabase};
pub use storage::LocalImageStorage;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
