//! # BlogFeed Core
//!
//! The domain layer of BlogFeed: posts, categories and comments, the access
//! gate and the workflows that tie them together.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod access;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use access::{Caller, Operation, Principal};
pub use error::{DomainError, DomainResult};
