use std::sync::Arc;

use crate::access::{Caller, Operation, authorize};
use crate::domain::{Category, CategoryInput};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::{CategoryRepository, PostRepository};

const ENTITY: &str = "Category";

/// Category administration. Every operation is admin-only.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { categories, posts }
    }

    pub async fn list(&self, caller: &Caller) -> DomainResult<Vec<Category>> {
        authorize(Operation::ListCategories, caller)?;
        Ok(self.categories.list().await?)
    }

    pub async fn get(&self, caller: &Caller, id: i32) -> DomainResult<Category> {
        authorize(Operation::ViewCategory, caller)?;
        self.find(id).await
    }

    pub async fn create(&self, caller: &Caller, input: CategoryInput) -> DomainResult<Category> {
        authorize(Operation::CreateCategory, caller)?;

        let input = input.normalized();
        input.check()?;

        let category = self
            .categories
            .save(Category::new(input.name, input.description))
            .await?;

        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: i32,
        input: CategoryInput,
    ) -> DomainResult<Category> {
        authorize(Operation::UpdateCategory, caller)?;

        let input = input.normalized();
        input.check()?;

        let mut category = self.find(id).await?;
        category.apply(input);

        let category = self.categories.save(category).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;

        tracing::info!(category_id = id, "Category updated");
        Ok(category)
    }

    /// Delete a category. Refused with `Conflict` while posts still use it.
    pub async fn delete(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        authorize(Operation::DeleteCategory, caller)?;

        self.find(id).await?;

        let in_use = self.posts.count_by_category(id).await?;
        if in_use > 0 {
            return Err(DomainError::Conflict(format!(
                "Category {} still has {} post(s); move or delete them first",
                id, in_use
            )));
        }

        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }
}
