//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create or update a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A select-list entry for the category dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

/// A post as shown in the listing, with a plain-text excerpt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub id: i32,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    pub category_id: i32,
    pub category_name: String,
    pub feature_image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostSummaryResponse>,
    pub categories: Vec<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category_id: Option<i32>,
}

/// A full post with its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub feature_image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Options for an empty create-post form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub categories: Vec<CategoryOption>,
}

/// A post pre-filled into the edit form, with the current category selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostFormResponse {
    pub post: PostResponse,
    pub categories: Vec<CategoryOption>,
}

/// Request to add a comment. Any client-supplied date is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub comment_content: String,
}

/// Comment projection: `{username, commentDate: "Month DD, YYYY", content}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub username: String,
    pub comment_date: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_post_fields() {
        let detail = PostDetailResponse {
            post: PostResponse {
                id: 7,
                title: "Tech Post 1".into(),
                content: "Body".into(),
                author: "John Doe".into(),
                published_date: Utc::now(),
                category_id: 1,
                category_name: Some("Technology".into()),
                feature_image_path: None,
            },
            comments: vec![CommentResponse {
                username: "Alice".into(),
                comment_date: "March 04, 2024".into(),
                content: "Nice post!".into(),
            }],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["categoryName"], "Technology");
        assert!(json["featureImagePath"].is_null());
        assert_eq!(json["comments"][0]["commentDate"], "March 04, 2024");
    }

    #[test]
    fn test_comment_request_reads_camel_case() {
        let request: CommentRequest =
            serde_json::from_str(r#"{"userName":"Alice","commentContent":"Hi","commentDate":"2001-01-01"}"#)
                .unwrap();

        assert_eq!(request.user_name, "Alice");
        assert_eq!(request.comment_content, "Hi");
    }

    #[test]
    fn test_missing_category_fields_default_to_empty() {
        let request: CategoryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_empty());
        assert!(request.description.is_none());
    }
}
