//! Application state - shared across all handlers.

use std::sync::Arc;

use blogfeed_core::ports::{CategoryRepository, CommentRepository, ImageStorage, PostRepository};
use blogfeed_core::services::{CategoryService, CommentService, PostService};
use blogfeed_infra::{DatabaseConnections, InMemoryDatabase, LocalImageStorage};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use blogfeed_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub max_upload_bytes: usize,
}

/// The repository adapters behind the services.
struct Repositories {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    /// Shared in-memory tables, seeded with the default categories.
    async fn in_memory() -> Self {
        let db = InMemoryDatabase::new();
        db.seed_default_categories().await;

        Self {
            categories: Arc::new(db.categories()),
            posts: Arc::new(db.posts()),
            comments: Arc::new(db.comments()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        Self {
            categories: Arc::new(PostgresCategoryRepository::new(connections.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(connections.main.clone())),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let images: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(&config.media_root));

        #[cfg(feature = "postgres")]
        let (db, repos) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        if config.run_migrations {
                            use migration::{Migrator, MigratorTrait};

                            Migrator::up(&connections.main, None).await?;
                            tracing::info!("Database migrations applied");
                        }
                        let repos = Repositories::postgres(&connections);
                        (Some(Arc::new(connections)), repos)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Repositories::in_memory().await)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory().await)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, repos) = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repositories");
            (None, Repositories::in_memory().await)
        };

        tracing::info!(media_root = %config.media_root.display(), "Application state initialized");

        Ok(Self::assemble(repos, images, db, config.max_upload_bytes))
    }

    /// State over seeded in-memory tables and local image storage under `media_root`.
    #[cfg(test)]
    pub async fn in_memory(media_root: &std::path::Path, max_upload_bytes: usize) -> Self {
        Self::assemble(
            Repositories::in_memory().await,
            Arc::new(LocalImageStorage::new(media_root)),
            None,
            max_upload_bytes,
        )
    }

    fn assemble(
        repos: Repositories,
        images: Arc<dyn ImageStorage>,
        db: Option<Arc<DatabaseConnections>>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(
                repos.categories.clone(),
                repos.posts.clone(),
            )),
            posts: Arc::new(PostService::new(
                repos.posts.clone(),
                repos.categories,
                repos.comments.clone(),
                images,
            )),
            comments: Arc::new(CommentService::new(repos.comments, repos.posts)),
            db,
            max_upload_bytes,
        }
    }

    /// Which store backs the repositories.
    pub fn store_kind(&self) -> &'static str {
        if self.db.is_some() {
            "postgres"
        } else {
            "in-memory"
        }
    }
}
