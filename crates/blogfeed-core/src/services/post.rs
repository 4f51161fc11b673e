use std::sync::Arc;

use crate::access::{Caller, Operation, authorize};
use crate::domain::{
    Category, EditPostForm, INVALID_IMAGE_FORMAT, ImageUpload, Post, PostDetail, PostInput,
    PostListing, PostWithCategory,
};
use crate::error::{DomainError, DomainResult, FieldErrors, RepoError};
use crate::ports::{CategoryRepository, CommentRepository, ImageStorage, PostRepository};

const ENTITY: &str = "Post";

/// Post workflows, including the feature image lifecycle.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    comments: Arc<dyn CommentRepository>,
    images: Arc<dyn ImageStorage>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        comments: Arc<dyn CommentRepository>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            posts,
            categories,
            comments,
            images,
        }
    }

    /// Posts in id order, optionally filtered, with every category for the filter UI.
    pub async fn list(&self, caller: &Caller, category_id: Option<i32>) -> DomainResult<PostListing> {
        authorize(Operation::ListPosts, caller)?;

        let posts = self.posts.list_with_category(category_id).await?;
        let categories = self.categories.list().await?;
        Ok(PostListing { posts, categories })
    }

    pub async fn detail(&self, caller: &Caller, id: i32) -> DomainResult<PostDetail> {
        authorize(Operation::ViewPost, caller)?;

        let post = self.find(id).await?;
        let category = self.category_of(&post).await?;
        let comments = self.comments.find_by_post(id).await?;
        Ok(PostDetail {
            post,
            category,
            comments,
        })
    }

    /// Category options for an empty create form.
    pub async fn new_form(&self, caller: &Caller) -> DomainResult<Vec<Category>> {
        authorize(Operation::CreatePost, caller)?;
        Ok(self.categories.list().await?)
    }

    pub async fn edit_form(&self, caller: &Caller, id: i32) -> DomainResult<EditPostForm> {
        authorize(Operation::EditPost, caller)?;

        let post = self.find(id).await?;
        let categories = self.categories.list().await?;
        Ok(EditPostForm { post, categories })
    }

    /// The post shown on the delete confirmation step.
    pub async fn delete_confirmation(
        &self,
        caller: &Caller,
        id: i32,
    ) -> DomainResult<PostWithCategory> {
        authorize(Operation::DeletePost, caller)?;

        let post = self.find(id).await?;
        let category = self.category_of(&post).await?;
        Ok(PostWithCategory { post, category })
    }

    /// Create a post. The feature image is required.
    ///
    /// Nothing is written unless every field and the image pass validation.
    /// If the record cannot be saved the stored image is removed again.
    pub async fn create(
        &self,
        caller: &Caller,
        input: PostInput,
        image: Option<ImageUpload>,
    ) -> DomainResult<Post> {
        authorize(Operation::CreatePost, caller)?;

        let mut errors = input.check().err().unwrap_or_default();
        match &image {
            None => errors.push("featureImage", "Feature image is required"),
            Some(upload) if upload.extension().is_none() => {
                errors.push("featureImage", INVALID_IMAGE_FORMAT)
            }
            Some(_) => {}
        }
        errors.into_result()?;
        self.ensure_category(input.category_id).await?;

        let Some(upload) = image else {
            return Err(DomainError::invalid("featureImage", "Feature image is required"));
        };
        let path = self.images.store(&upload.bytes, &upload.file_name).await?;

        let post = match self.posts.save(Post::new(input, Some(path.clone()))).await {
            Ok(post) => post,
            Err(e) => {
                self.discard_image(&path).await;
                return Err(e.into());
            }
        };

        tracing::info!(post_id = post.id, image = %path, "Post created");
        Ok(post)
    }

    /// Update a post. Without a new image the stored image path is kept.
    ///
    /// A replaced image is removed only after the record points at the new one.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i32,
        input: PostInput,
        image: Option<ImageUpload>,
    ) -> DomainResult<Post> {
        authorize(Operation::EditPost, caller)?;

        let mut post = self.find(id).await?;

        let mut errors = input.check().err().unwrap_or_default();
        if let Some(upload) = &image {
            if upload.extension().is_none() {
                errors.push("featureImage", INVALID_IMAGE_FORMAT);
            }
        }
        errors.into_result()?;
        self.ensure_category(input.category_id).await?;

        post.apply(input);

        let stored = match image {
            Some(upload) => Some(self.images.store(&upload.bytes, &upload.file_name).await?),
            None => None,
        };
        let previous = match &stored {
            Some(path) => post.feature_image_path.replace(path.clone()),
            None => None,
        };

        let saved = match self.posts.save(post).await {
            Ok(saved) => saved,
            Err(e) => {
                if let Some(path) = &stored {
                    self.discard_image(path).await;
                }
                return Err(match e {
                    RepoError::NotFound => DomainError::not_found(ENTITY, id),
                    other => other.into(),
                });
            }
        };

        if let Some(old_path) = previous {
            self.discard_image(&old_path).await;
        }

        tracing::info!(post_id = id, "Post updated");
        Ok(saved)
    }

    /// Delete a post and, best-effort, its feature image.
    pub async fn delete(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        authorize(Operation::DeletePost, caller)?;

        let post = self.find(id).await?;
        if let Some(path) = post.feature_image_path.as_deref() {
            self.discard_image(path).await;
        }

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn category_of(&self, post: &Post) -> DomainResult<Category> {
        self.categories
            .find_by_id(post.category_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "post {} references missing category {}",
                    post.id, post.category_id
                ))
            })
    }

    async fn ensure_category(&self, category_id: i32) -> DomainResult<()> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(FieldErrors::single("categoryId", "Selected category does not exist").into()),
        }
    }

    /// Best-effort cleanup: failures are logged and swallowed.
    async fn discard_image(&self, path: &str) {
        if path.is_empty() {
            return;
        }
        if let Err(e) = self.images.delete(path).await {
            tracing::warn!(image = %path, error = %e, "Failed to delete feature image");
        }
    }
}
