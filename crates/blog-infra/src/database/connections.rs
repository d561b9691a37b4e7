use std::time::Duration;

#[cfg(feature = "sql")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post store database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Create the `blog_posts` table at startup when it does not exist.
    pub create_schema: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            create_schema: false,
        }
    }

    /// Private in-memory SQLite database with the schema created on connect.
    ///
    /// The pool is pinned to one connection: every SQLite `:memory:`
    /// connection is a separate database.
    #[cfg(any(test, feature = "sqlite"))]
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            create_schema: true,
        }
    }

    fn connect_timeout() -> Duration {
        Duration::from_secs(10)
    }

    fn idle_timeout() -> Duration {
        Duration::from_secs(300)
    }
}

/// Connection pool for the post store.
///
/// # Example
/// ```ignore
/// let pool = DatabasePool::init(&config).await?;
/// let posts = SqlPostRepository::new(pool.into_conn());
/// ```
#[cfg(feature = "sql")]
pub struct DatabasePool {
    conn: DbConn,
}

#[cfg(feature = "sql")]
impl DatabasePool {
    /// Open the pool and, if configured, create the schema.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(DatabaseConfig::connect_timeout())
            .idle_timeout(DatabaseConfig::idle_timeout())
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}-{})",
            config.min_connections,
            config.max_connections
        );

        if config.create_schema {
            super::ensure_schema(&conn).await?;
        }

        Ok(Self { conn })
    }

    /// Hand the connection over to a repository.
    pub fn into_conn(self) -> DbConn {
        self.conn
    }
}
