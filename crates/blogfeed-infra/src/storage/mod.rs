//! Feature image storage implementations.

mod local;

pub use local::LocalImageStorage;
