//! Domain records to wire DTOs.

use blogfeed_core::domain::{Category, Comment, Post, PostDetail, PostWithCategory, excerpt};
use blogfeed_shared::dto::{
    CategoryOption, CategoryResponse, CommentResponse, PostDetailResponse, PostResponse,
    PostSummaryResponse,
};

/// Characters of plain text shown in a listing excerpt.
const EXCERPT_CHARS: usize = 200;

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        description: category.description,
    }
}

/// Dropdown options, with `selected` marking the current category.
pub fn category_options(categories: Vec<Category>, selected: Option<i32>) -> Vec<CategoryOption> {
    categories
        .into_iter()
        .map(|c| CategoryOption {
            value: c.id.to_string(),
            text: c.name,
            selected: selected == Some(c.id),
        })
        .collect()
}

pub fn post(post: Post, category_name: Option<String>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        published_date: post.published_date,
        category_id: post.category_id,
        category_name,
        feature_image_path: post.feature_image_path,
    }
}

pub fn post_summary(item: PostWithCategory) -> PostSummaryResponse {
    let PostWithCategory { post, category } = item;
    PostSummaryResponse {
        id: post.id,
        excerpt: excerpt(&post.content, EXCERPT_CHARS),
        title: post.title,
        author: post.author,
        published_date: post.published_date,
        category_id: post.category_id,
        category_name: category.name,
        feature_image_path: post.feature_image_path,
    }
}

pub fn comment(comment: &Comment) -> CommentResponse {
    let view = comment.view();
    CommentResponse {
        username: view.username,
        comment_date: view.comment_date,
        content: view.content,
    }
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    let comments = detail.comments.iter().map(comment).collect();
    PostDetailResponse {
        post: post(detail.post, Some(detail.category.name)),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogfeed_core::domain::PostInput;

    fn category_named(id: i32, name: &str) -> Category {
        let mut c = Category::new(name.to_string(), None);
        c.id = id;
        c
    }

    #[test]
    fn test_options_mark_selected_category() {
        let options = category_options(
            vec![category_named(1, "Technology"), category_named(2, "Health")],
            Some(2),
        );

        assert_eq!(options[0].value, "1");
        assert!(!options[0].selected);
        assert_eq!(options[1].text, "Health");
        assert!(options[1].selected);
    }

    #[test]
    fn test_summary_excerpt_is_plain_text() {
        let mut p = Post::new(
            PostInput {
                title: "Tech Post 1".into(),
                content: format!("<p>{}</p>", "a".repeat(250)),
                author: "John Doe".into(),
                published_date: None,
                category_id: 1,
            },
            Some("/images/x.jpg".into()),
        );
        p.id = 5;

        let summary = post_summary(PostWithCategory {
            post: p,
            category: category_named(1, "Technology"),
        });

        assert_eq!(summary.excerpt, format!("{}...", "a".repeat(200)));
        assert_eq!(summary.category_name, "Technology");
    }
}
