//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<BlogPost> = store.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, fields: PostFields) -> Result<BlogPost, RepoError> {
        let post = BlogPost::create(fields)?;

        self.store.write().await.insert(post.id, post.clone());
        tracing::debug!(post_id = %post.id, "Created blog post in memory");
        Ok(post)
    }

    async fn insert_many(&self, records: Vec<PostFields>) -> Result<Vec<BlogPost>, RepoError> {
        // Validate everything before taking the lock so a bad record writes nothing.
        let posts = records
            .into_iter()
            .map(BlogPost::create)
            .collect::<Result<Vec<_>, _>>()?;

        let mut store = self.store.write().await;
        for post in &posts {
            store.insert(post.id, post.clone());
        }

        Ok(posts)
    }

    async fn replace_by_id(&self, id: Uuid, fields: PostFields) -> Result<bool, RepoError> {
        fields.validate()?;

        let mut store = self.store.write().await;
        match store.get_mut(&id) {
            Some(post) => {
                post.replace(fields)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn drop_all(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.len() as u64;
        store.clear();
        Ok(removed)
    }
}
