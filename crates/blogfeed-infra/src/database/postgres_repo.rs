//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use blogfeed_core::domain::{Category, Comment, PostWithCategory};
use blogfeed_core::error::RepoError;
use blogfeed_core::ports::{CategoryRepository, CommentRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_with_category(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<PostWithCategory>, RepoError> {
        tracing::debug!(?category_id, "Listing posts");

        let mut query = PostEntity::find().find_also_related(CategoryEntity);
        if let Some(category_id) = category_id {
            query = query.filter(post::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(post, category)| {
                let category = category.ok_or_else(|| {
                    RepoError::Query(format!(
                        "post {} references missing category {}",
                        post.id, post.category_id
                    ))
                })?;
                Ok(PostWithCategory {
                    post: post.into(),
                    category: category.into(),
                })
            })
            .collect()
    }

    async fn count_by_category(&self, category_id: i32) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError> {
        let active_model: comment::ActiveModel = comment.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
