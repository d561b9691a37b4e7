//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::{DatabasePool, SqlPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// State over an explicit repository.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    /// Build the application state from configuration.
    ///
    /// A configured database that cannot be reached is a startup error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        #[cfg(feature = "postgres")]
        {
            let pool = DatabasePool::init(config).await?;
            tracing::info!("Application state initialized (SQL store)");
            Ok(Self::with_repository(Arc::new(SqlPostRepository::new(
                pool.into_conn(),
            ))))
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            anyhow::bail!("DATABASE_URL is set, but the server was built without the postgres feature")
        }
    }
}
