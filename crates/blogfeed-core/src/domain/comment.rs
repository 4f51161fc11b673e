use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FieldErrors;

/// Comment entity - a reader's remark on a post. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub user_name: String,
    pub comment_date: DateTime<Utc>,
    pub comment_content: String,
    pub post_id: i32,
}

impl Comment {
    /// Create a new, unsaved comment stamped with the current server time.
    pub fn new(post_id: i32, input: CommentInput) -> Self {
        Self {
            id: 0,
            user_name: input.user_name,
            comment_date: Utc::now(),
            comment_content: input.comment_content,
            post_id,
        }
    }

    /// The projection shown right after a comment is posted.
    pub fn view(&self) -> CommentView {
        CommentView {
            username: self.user_name.clone(),
            comment_date: self.comment_date.format("%B %d, %Y").to_string(),
            content: self.comment_content.clone(),
        }
    }
}

/// Caller-supplied comment fields. Any client-side date is never part of this.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(length(max = 100, message = "User Name can not exceed 100 characters!!"))]
    pub user_name: String,
    pub comment_content: String,
}

impl CommentInput {
    pub fn new(user_name: impl Into<String>, comment_content: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            comment_content: comment_content.into(),
        }
    }

    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate());
        if self.user_name.trim().is_empty() {
            errors.push("userName", "User Name is Required!!");
        }
        if self.comment_content.trim().is_empty() {
            errors.push("commentContent", "Comment is Required!!");
        }
        errors.into_result()
    }
}

/// Display projection: `{username, commentDate: "Month DD, YYYY", content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub username: String,
    pub comment_date: String,
    pub content: String,
}
