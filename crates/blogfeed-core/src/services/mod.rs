//! Workflow services - one per aggregate.
//!
//! Each public method authorizes the caller first, then validates, then talks
//! to the injected ports. Services hold no state of their own.

mod category;
mod comment;
mod post;

pub use category::CategoryService;
pub use comment::CommentService;
pub use post::PostService;
