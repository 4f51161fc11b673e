use std::sync::Arc;

use crate::access::{Caller, Operation, authorize};
use crate::domain::{Comment, CommentInput};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CommentRepository, PostRepository};

/// Append-only comments on posts.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Add a comment to an existing post, dated with the server clock.
    pub async fn add(
        &self,
        caller: &Caller,
        post_id: i32,
        input: CommentInput,
    ) -> DomainResult<Comment> {
        authorize(Operation::AddComment, caller)?;

        let input = CommentInput::new(input.user_name.trim(), input.comment_content);
        input.check()?;

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("Post", post_id));
        }

        let comment = self.comments.add(Comment::new(post_id, input)).await?;

        tracing::info!(post_id, comment_id = comment.id, "Comment added");
        Ok(comment)
    }
}
