//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod storage;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use repository::{BaseRepository, CategoryRepository, CommentRepository, PostRepository};
pub use storage::{ImageStorage, StorageError};
