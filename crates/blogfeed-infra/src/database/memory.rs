//! In-memory repositories - used when no database is configured and in tests.
//!
//! All three repositories share one set of tables so that joins, the
//! category reference count and comment cascade behave like the schema.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blogfeed_core::domain::{Category, Comment, Post, PostWithCategory};
use blogfeed_core::error::RepoError;
use blogfeed_core::ports::{BaseRepository, CategoryRepository, CommentRepository, PostRepository};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    posts: BTreeMap<i32, Post>,
    comments: BTreeMap<i32, Comment>,
    next_category_id: i32,
    next_post_id: i32,
    next_comment_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Handle to the shared in-memory tables.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.tables.clone(),
        }
    }

    /// Insert the default categories (Technology, Health, LifeStyle).
    pub async fn seed_default_categories(&self) {
        let mut tables = self.tables.write().await;
        for name in ["Technology", "Health", "LifeStyle"] {
            let id = next_id(&mut tables.next_category_id);
            tables
                .categories
                .insert(id, Category::new(name.to_string(), None).with_id(id));
        }
    }
}

trait WithId {
    fn with_id(self, id: i32) -> Self;
}

impl WithId for Category {
    fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

impl WithId for Post {
    fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

impl WithId for Comment {
    fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Category, i32> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let entity = if entity.id == 0 {
            let id = next_id(&mut tables.next_category_id);
            entity.with_id(id)
        } else if tables.categories.contains_key(&entity.id) {
            entity
        } else {
            return Err(RepoError::NotFound);
        };

        tables.categories.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.values().any(|p| p.category_id == id) {
            return Err(RepoError::Constraint(format!(
                "category {} is referenced by posts",
                id
            )));
        }
        tables
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&entity.category_id) {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                entity.category_id
            )));
        }

        let entity = if entity.id == 0 {
            let id = next_id(&mut tables.next_post_id);
            entity.with_id(id)
        } else if tables.posts.contains_key(&entity.id) {
            entity
        } else {
            return Err(RepoError::NotFound);
        };

        tables.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // ON DELETE CASCADE
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_with_category(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<PostWithCategory>, RepoError> {
        let tables = self.tables.read().await;
        tables
            .posts
            .values()
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .map(|post| {
                let category = tables
                    .categories
                    .get(&post.category_id)
                    .cloned()
                    .ok_or_else(|| {
                        RepoError::Query(format!(
                            "post {} references missing category {}",
                            post.id, post.category_id
                        ))
                    })?;
                Ok(PostWithCategory {
                    post: post.clone(),
                    category,
                })
            })
            .collect()
    }

    async fn count_by_category(&self, category_id: i32) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.category_id == category_id)
            .count() as u64)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }

        let id = next_id(&mut tables.next_comment_id);
        let comment = comment.with_id(id);
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}
