//! Per-test fixtures: every test owns a private SQLite store.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::App;

use api_server::{AppState, configure_app};
use blog_core::domain::BlogPost;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_infra::seed::seed_posts;
use blog_infra::{DatabaseConfig, DatabasePool, SqlPostRepository};

pub mod routes {
    pub const POSTS: &str = "/posts";
    pub const HEALTH: &str = "/health";

    pub fn post(id: impl std::fmt::Display) -> String {
        format!("/posts/{id}")
    }
}

pub struct TestContext {
    pub repo: Arc<SqlPostRepository>,
    pub state: AppState,
}

impl TestContext {
    /// Fresh, empty store.
    pub async fn new() -> Self {
        let pool = DatabasePool::init(&DatabaseConfig::sqlite_memory())
            .await
            .expect("Failed to open SQLite test database");
        let repo = Arc::new(SqlPostRepository::new(pool.into_conn()));
        let state = AppState::with_repository(repo.clone());

        Self { repo, state }
    }

    /// Fresh store holding `count` random posts.
    pub async fn seeded(count: usize) -> (Self, Vec<BlogPost>) {
        let ctx = Self::new().await;
        let posts = seed_posts(ctx.repo.as_ref(), count)
            .await
            .expect("Failed to seed posts");
        (ctx, posts)
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new().configure(configure_app(self.state.clone()))
    }

    pub async fn find(&self, id: uuid::Uuid) -> Option<BlogPost> {
        self.repo.find_by_id(id).await.expect("lookup failed")
    }

    pub async fn count(&self) -> u64 {
        self.repo.count().await.expect("count failed")
    }

    /// Remove everything this test wrote.
    pub async fn teardown(self) {
        self.repo.drop_all().await.expect("Failed to drop posts");
        assert_eq!(self.count().await, 0);
    }
}
