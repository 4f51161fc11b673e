use async_trait::async_trait;

use crate::domain::{Category, Comment, Post, PostWithCategory};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity. Unsaved entities (id `0`) are inserted and come back
    /// with their assigned id; others are updated and yield
    /// `RepoError::NotFound` when the row is gone.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    /// All categories in id order.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Posts joined with their category in id order, optionally filtered.
    async fn list_with_category(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<PostWithCategory>, RepoError>;

    /// Number of posts filed under `category_id`.
    async fn count_by_category(&self, category_id: i32) -> Result<u64, RepoError>;
}

/// Comment repository. Append-only: there is no update or delete.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment and return it with its assigned id.
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments of a post in id order.
    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;
}
