use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Category, Comment};
use crate::error::FieldErrors;

/// Post entity - represents a blog post or article.
///
/// An `id` of `0` marks a post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    pub category_id: i32,
    pub feature_image_path: Option<String>,
}

impl Post {
    /// Create a new, unsaved post from validated input.
    pub fn new(input: PostInput, feature_image_path: Option<String>) -> Self {
        Self {
            id: 0,
            title: input.title,
            content: input.content,
            author: input.author,
            published_date: input.published_date.unwrap_or_else(Utc::now),
            category_id: input.category_id,
            feature_image_path,
        }
    }

    /// Overwrite the editable fields. The image path is managed separately.
    ///
    /// A missing `published_date` keeps the stored one.
    pub fn apply(&mut self, input: PostInput) {
        self.title = input.title;
        self.content = input.content;
        self.author = input.author;
        if let Some(date) = input.published_date {
            self.published_date = date;
        }
        self.category_id = input.category_id;
    }
}

/// Caller-supplied post fields for create and edit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(max = 200, message = "Title cannot exceed 200 characters!!"))]
    pub title: String,
    pub content: String,
    #[validate(length(max = 100, message = "Author cannot exceed 100 characters!!"))]
    pub author: String,
    pub published_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Category is Required!!"))]
    pub category_id: i32,
}

impl PostInput {
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate());
        if self.title.trim().is_empty() {
            errors.push("title", "Title is Required!!");
        }
        if self.content.trim().is_empty() {
            errors.push("content", "Content is Required!!");
        }
        if self.author.trim().is_empty() {
            errors.push("author", "Author is Required!!");
        }
        errors.into_result()
    }
}

/// A post joined with its category.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithCategory {
    pub post: Post,
    pub category: Category,
}

/// Everything the detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub category: Category,
    pub comments: Vec<Comment>,
}

/// Post list plus the categories offered as filters.
#[derive(Debug, Clone, Serialize)]
pub struct PostListing {
    pub posts: Vec<PostWithCategory>,
    pub categories: Vec<Category>,
}

/// Stored post and the category options for the edit form.
#[derive(Debug, Clone, Serialize)]
pub struct EditPostForm {
    pub post: Post,
    pub categories: Vec<Category>,
}
