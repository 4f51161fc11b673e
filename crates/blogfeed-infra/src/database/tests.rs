#[cfg(test)]
mod tests {
    use crate::database::entity::{category, comment, post};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    };
    use blogfeed_core::domain::{Category, Post};
    use blogfeed_core::error::RepoError;
    use blogfeed_core::ports::{BaseRepository, CommentRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn tech_post(id: i32) -> post::Model {
        post::Model {
            id,
            title: "Tech Post 1".to_owned(),
            content: "Content of Tech Post 1".to_owned(),
            author: "John Doe".to_owned(),
            published_date: chrono::Utc::now().into(),
            category_id: 1,
            feature_image_path: Some("/images/tech.jpg".to_owned()),
        }
    }

    fn technology() -> category::Model {
        category::Model {
            id: 1,
            name: "Technology".to_owned(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tech_post(1)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(1).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Tech Post 1");
        assert_eq!(post.id, 1);
        assert_eq!(post.feature_image_path.as_deref(), Some("/images/tech.jpg"));
    }

    #[tokio::test]
    async fn test_insert_category_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: 4,
                name: "Travel".to_owned(),
                description: Some("Trips".to_owned()),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);
        let saved = repo
            .save(Category::new("Travel".into(), Some("Trips".into())))
            .await
            .unwrap();

        assert_eq!(saved.id, 4);
        assert_eq!(saved.name, "Travel");
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);
        let result = BaseRepository::<Category, i32>::delete(&repo, 99).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_with_category_joins_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![(tech_post(1), technology())]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let rows = repo.list_with_category(Some(1)).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category.name, "Technology");
        assert_eq!(rows[0].post.category_id, 1);
    }

    #[tokio::test]
    async fn test_comments_by_post() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![comment::Model {
                id: 1,
                user_name: "Alice".to_owned(),
                comment_date: now.into(),
                comment_content: "Nice post!".to_owned(),
                post_id: 1,
            }]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let comments = repo.find_by_post(1).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].user_name, "Alice");
        assert_eq!(comments[0].comment_date, now);
    }
}
