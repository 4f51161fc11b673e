//! End-to-end workflow tests over the in-memory store and local image storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blogfeed_core::access::{Caller, Principal, ROLE_ADMIN, ROLE_USER};
use blogfeed_core::domain::{
    CategoryInput, CommentInput, ImageUpload, Post, PostInput, PostWithCategory,
};
use blogfeed_core::error::{DomainError, RepoError};
use blogfeed_core::ports::{BaseRepository, ImageStorage, PostRepository, StorageError};
use blogfeed_core::services::{CategoryService, CommentService, PostService};
use blogfeed_infra::{InMemoryDatabase, LocalImageStorage};

struct Blog {
    categories: CategoryService,
    posts: PostService,
    comments: CommentService,
    images: Arc<dyn ImageStorage>,
    media_root: tempfile::TempDir,
}

fn blog_with_storage(
    db: &InMemoryDatabase,
    images: Arc<dyn ImageStorage>,
) -> (CategoryService, PostService, CommentService) {
    let posts: Arc<dyn PostRepository> = Arc::new(db.posts());
    blog_with_repos(db, posts, images)
}

fn blog_with_repos(
    db: &InMemoryDatabase,
    posts: Arc<dyn PostRepository>,
    images: Arc<dyn ImageStorage>,
) -> (CategoryService, PostService, CommentService) {
    let categories = Arc::new(db.categories());
    let comments = Arc::new(db.comments());

    (
        CategoryService::new(categories.clone(), posts.clone()),
        PostService::new(posts.clone(), categories, comments.clone(), images),
        CommentService::new(comments, posts),
    )
}

async fn blog() -> Blog {
    let db = InMemoryDatabase::new();
    db.seed_default_categories().await;
    let media_root = tempfile::tempdir().unwrap();
    let images: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(media_root.path()));
    let (categories, posts, comments) = blog_with_storage(&db, images.clone());

    Blog {
        categories,
        posts,
        comments,
        images,
        media_root,
    }
}

fn caller(roles: &[&str]) -> Caller {
    Caller::Authenticated(Principal {
        user_id: Uuid::new_v4(),
        email: "someone@example.com".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    })
}

fn admin() -> Caller {
    caller(&[ROLE_ADMIN])
}

fn post_input(category_id: i32) -> PostInput {
    PostInput {
        title: "Tech Post 1".into(),
        content: "<p>Content of Tech Post 1</p>".into(),
        author: "John Doe".into(),
        published_date: None,
        category_id,
    }
}

fn jpg() -> Option<ImageUpload> {
    Some(ImageUpload::new("cover.jpg", b"\xff\xd8\xff".to_vec()))
}

fn image_count(blog: &Blog) -> usize {
    match std::fs::read_dir(blog.media_root.path().join("images")) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

#[tokio::test]
async fn test_category_create_list_delete() {
    let blog = blog().await;
    let admin = admin();

    let created = blog
        .categories
        .create(&admin, CategoryInput::new("Travel", Some("Trips".into())))
        .await
        .unwrap();

    let listed = blog.categories.list(&admin).await.unwrap();
    assert_eq!(listed.iter().filter(|c| c.id == created.id).count(), 1);

    blog.categories.delete(&admin, created.id).await.unwrap();
    assert!(matches!(
        blog.categories.get(&admin, created.id).await,
        Err(DomainError::NotFound { entity_type: "Category", .. })
    ));
}

#[tokio::test]
async fn test_category_update_overwrites_fields() {
    let blog = blog().await;
    let admin = admin();

    let updated = blog
        .categories
        .update(&admin, 3, CategoryInput::new("Lifestyle", Some("Daily life".into())))
        .await
        .unwrap();

    assert_eq!(updated.id, 3);
    assert_eq!(updated.name, "Lifestyle");
    assert_eq!(
        blog.categories.get(&admin, 3).await.unwrap().description.as_deref(),
        Some("Daily life")
    );
    assert!(matches!(
        blog.categories
            .update(&admin, 404, CategoryInput::new("Nope", None))
            .await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_category_with_posts_cannot_be_deleted() {
    let blog = blog().await;
    let admin = admin();
    blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();

    let result = blog.categories.delete(&admin, 1).await;

    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert!(blog.categories.get(&admin, 1).await.is_ok());
}

#[tokio::test]
async fn test_invalid_category_is_rejected() {
    let blog = blog().await;

    let result = blog
        .categories
        .create(&admin(), CategoryInput::new("", None))
        .await;

    match result {
        Err(DomainError::Validation(errors)) => assert!(errors.has_field("name")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_created_post_points_at_stored_image() {
    let blog = blog().await;

    let post = blog.posts.create(&admin(), post_input(1), jpg()).await.unwrap();
    let detail = blog.posts.detail(&Caller::Anonymous, post.id).await.unwrap();

    let path = detail.post.feature_image_path.unwrap();
    assert!(path.starts_with("/images/") && path.ends_with(".jpg"));
    assert!(blog.images.exists(&path).await.unwrap());
    assert_eq!(detail.category.name, "Technology");
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_disallowed_extension_writes_nothing() {
    let blog = blog().await;
    let admin = admin();

    let result = blog
        .posts
        .create(
            &admin,
            post_input(1),
            Some(ImageUpload::new("anim.gif", b"GIF89a".to_vec())),
        )
        .await;

    match result {
        Err(DomainError::Validation(errors)) => assert!(errors.has_field("featureImage")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(image_count(&blog), 0);
    assert!(blog.posts.list(&admin, None).await.unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_post_without_image_or_category_is_rejected() {
    let blog = blog().await;
    let admin = admin();

    let missing_image = blog.posts.create(&admin, post_input(1), None).await;
    assert!(matches!(
        missing_image,
        Err(DomainError::Validation(e)) if e.has_field("featureImage")
    ));

    let unknown_category = blog.posts.create(&admin, post_input(77), jpg()).await;
    assert!(matches!(
        unknown_category,
        Err(DomainError::Validation(e)) if e.has_field("categoryId")
    ));

    assert_eq!(image_count(&blog), 0);
}

#[tokio::test]
async fn test_update_with_new_image_replaces_old_file() {
    let blog = blog().await;
    let admin = admin();
    let post = blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();
    let old_path = post.feature_image_path.clone().unwrap();

    let updated = blog
        .posts
        .update(
            &admin,
            post.id,
            post_input(2),
            Some(ImageUpload::new("new.PNG", b"\x89PNG".to_vec())),
        )
        .await
        .unwrap();

    let new_path = updated.feature_image_path.unwrap();
    assert_ne!(new_path, old_path);
    assert!(new_path.ends_with(".png"));
    assert!(!blog.images.exists(&old_path).await.unwrap());
    assert!(blog.images.exists(&new_path).await.unwrap());
    assert_eq!(updated.category_id, 2);
}

#[tokio::test]
async fn test_update_without_image_keeps_existing_path() {
    let blog = blog().await;
    let admin = admin();
    let post = blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();

    let updated = blog
        .posts
        .update(
            &admin,
            post.id,
            PostInput {
                title: "Edited".into(),
                ..post_input(1)
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Edited");
    assert_eq!(updated.feature_image_path, post.feature_image_path);
    assert_eq!(updated.published_date, post.published_date);
    assert!(
        blog.images
            .exists(updated.feature_image_path.as_deref().unwrap())
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_update_with_disallowed_extension_changes_nothing() {
    let blog = blog().await;
    let admin = admin();
    let post = blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();
    let old_path = post.feature_image_path.clone().unwrap();

    let result = blog
        .posts
        .update(
            &admin,
            post.id,
            PostInput {
                title: "Edited".into(),
                ..post_input(2)
            },
            Some(ImageUpload::new("anim.gif", b"GIF89a".to_vec())),
        )
        .await;

    match result {
        Err(DomainError::Validation(errors)) => assert!(errors.has_field("featureImage")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(blog.images.exists(&old_path).await.unwrap());
    assert_eq!(image_count(&blog), 1);

    let unchanged = blog.posts.detail(&admin, post.id).await.unwrap().post;
    assert_eq!(unchanged.title, "Tech Post 1");
    assert_eq!(unchanged.category_id, 1);
    assert_eq!(unchanged.feature_image_path, Some(old_path));
}

#[tokio::test]
async fn test_update_of_missing_post_is_not_found() {
    let blog = blog().await;

    let result = blog.posts.update(&admin(), 99, post_input(1), jpg()).await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound { entity_type: "Post", id: 99 })
    ));
    assert_eq!(image_count(&blog), 0);
}

#[tokio::test]
async fn test_delete_removes_record_and_image() {
    let blog = blog().await;
    let admin = admin();
    let post = blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();
    let path = post.feature_image_path.clone().unwrap();

    blog.posts.delete(&admin, post.id).await.unwrap();

    assert!(!blog.images.exists(&path).await.unwrap());
    assert!(matches!(
        blog.posts.detail(&Caller::Anonymous, post.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        blog.posts.delete(&admin, post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_proceeds_when_image_is_already_gone() {
    let blog = blog().await;
    let admin = admin();
    let post = blog.posts.create(&admin, post_input(1), jpg()).await.unwrap();
    blog.images
        .delete(post.feature_image_path.as_deref().unwrap())
        .await
        .unwrap();

    blog.posts.delete(&admin, post.id).await.unwrap();

    assert!(blog.posts.list(&admin, None).await.unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_list_filters_by_category() {
    let blog = blog().await;
    let admin = admin();
    for category_id in [1, 2, 1, 3] {
        blog.posts
            .create(&admin, post_input(category_id), jpg())
            .await
            .unwrap();
    }

    let tech = blog.posts.list(&Caller::Anonymous, Some(1)).await.unwrap();
    assert_eq!(tech.posts.len(), 2);
    assert!(tech.posts.iter().all(|p| p.post.category_id == 1));
    assert_eq!(tech.categories.len(), 3);

    let all = blog.posts.list(&Caller::Anonymous, None).await.unwrap();
    let ids: Vec<i32> = all.posts.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_comment_is_dated_by_the_server() {
    let blog = blog().await;
    let post = blog.posts.create(&admin(), post_input(1), jpg()).await.unwrap();

    let comment = blog
        .comments
        .add(&caller(&[ROLE_USER]), post.id, CommentInput::new("Alice", "Nice post!"))
        .await
        .unwrap();

    assert_eq!(comment.comment_date.date_naive(), Utc::now().date_naive());
    let view = comment.view();
    assert_eq!(view.username, "Alice");
    assert_eq!(view.content, "Nice post!");
    assert_eq!(view.comment_date, Utc::now().format("%B %d, %Y").to_string());

    let detail = blog.posts.detail(&Caller::Anonymous, post.id).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let blog = blog().await;

    let result = blog
        .comments
        .add(&caller(&[ROLE_USER]), 12, CommentInput::new("Alice", "Hello?"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound { entity_type: "Post", id: 12 })
    ));
}

#[tokio::test]
async fn test_anonymous_callers_never_mutate() {
    let blog = blog().await;
    let anonymous = Caller::Anonymous;
    let post = blog.posts.create(&admin(), post_input(1), jpg()).await.unwrap();

    assert!(matches!(
        blog.posts.create(&anonymous, post_input(1), jpg()).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.posts.update(&anonymous, post.id, post_input(2), None).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.posts.delete(&anonymous, post.id).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.categories
            .create(&anonymous, CategoryInput::new("Spam", None))
            .await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.categories.delete(&anonymous, 2).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.comments
            .add(&anonymous, post.id, CommentInput::new("Anon", "hi"))
            .await,
        Err(DomainError::Unauthorized)
    ));

    let unchanged = blog.posts.detail(&anonymous, post.id).await.unwrap();
    assert_eq!(unchanged.post.category_id, 1);
    assert_eq!(image_count(&blog), 1);
}

#[tokio::test]
async fn test_readers_are_forbidden_from_admin_operations() {
    let blog = blog().await;
    let reader = caller(&[ROLE_USER]);

    assert!(matches!(
        blog.posts.create(&reader, post_input(1), jpg()).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        blog.categories.list(&reader).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        blog.posts.new_form(&reader).await,
        Err(DomainError::Forbidden)
    ));
    assert_eq!(image_count(&blog), 0);
}

/// Storage that fails every write, to prove upload errors abort the request.
struct BrokenStorage;

#[async_trait]
impl ImageStorage for BrokenStorage {
    async fn store(&self, _data: &[u8], _name: &str) -> Result<String, StorageError> {
        Err(StorageError::Io("No space left on device".into()))
    }

    async fn delete(&self, _path: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only file system".into()))
    }

    async fn exists(&self, _path: &str) -> Result<bool, StorageError> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_upload_failure_fails_the_request() {
    let db = InMemoryDatabase::new();
    db.seed_default_categories().await;
    let (_, posts, _) = blog_with_storage(&db, Arc::new(BrokenStorage));
    let admin = admin();

    let result = posts.create(&admin, post_input(1), jpg()).await;

    assert!(matches!(result, Err(DomainError::Storage(_))));
    assert!(posts.list(&admin, None).await.unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_failed_image_cleanup_does_not_fail_delete() {
    let db = InMemoryDatabase::new();
    db.seed_default_categories().await;
    let media_root = tempfile::tempdir().unwrap();
    let images = Arc::new(LocalImageStorage::new(media_root.path()));
    let (_, posts, _) = blog_with_storage(&db, images);
    let admin = admin();
    let post = posts.create(&admin, post_input(1), jpg()).await.unwrap();

    let (_, broken_posts, _) = blog_with_storage(&db, Arc::new(BrokenStorage));
    broken_posts.delete(&admin, post.id).await.unwrap();

    assert!(posts.list(&admin, None).await.unwrap().posts.is_empty());
}

/// Post store whose updates always fail; everything else reaches the real store.
struct RefusingUpdates(Arc<dyn PostRepository>);

#[async_trait]
impl BaseRepository<Post, i32> for RefusingUpdates {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        if entity.id == 0 {
            self.0.save(entity).await
        } else {
            Err(RepoError::Query("connection reset".into()))
        }
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.0.delete(id).await
    }
}

#[async_trait]
impl PostRepository for RefusingUpdates {
    async fn list_with_category(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<PostWithCategory>, RepoError> {
        self.0.list_with_category(category_id).await
    }

    async fn count_by_category(&self, category_id: i32) -> Result<u64, RepoError> {
        self.0.count_by_category(category_id).await
    }
}

#[tokio::test]
async fn test_failed_update_save_discards_new_image_and_keeps_old() {
    let db = InMemoryDatabase::new();
    db.seed_default_categories().await;
    let media_root = tempfile::tempdir().unwrap();
    let images: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(media_root.path()));
    let posts: Arc<dyn PostRepository> = Arc::new(RefusingUpdates(Arc::new(db.posts())));
    let (_, posts, _) = blog_with_repos(&db, posts, images.clone());
    let admin = admin();
    let post = posts.create(&admin, post_input(1), jpg()).await.unwrap();
    let old_path = post.feature_image_path.clone().unwrap();

    let result = posts
        .update(
            &admin,
            post.id,
            post_input(1),
            Some(ImageUpload::new("new.png", b"\x89PNG".to_vec())),
        )
        .await;

    assert!(matches!(result, Err(DomainError::Internal(_))));
    assert!(images.exists(&old_path).await.unwrap());
    let remaining = std::fs::read_dir(media_root.path().join("images")).unwrap().count();
    assert_eq!(remaining, 1);

    let stored = posts.detail(&admin, post.id).await.unwrap().post;
    assert_eq!(stored.feature_image_path, Some(old_path));
}
