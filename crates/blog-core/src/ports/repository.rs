use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, PostFields};
use crate::error::RepoError;

/// Generic repository trait defining the read and delete side of CRUD.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Return every stored entity.
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Idempotent: returns `Ok(false)` when nothing was stored under `id`.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Blog post store.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// Validate, assign id and creation time, persist.
    async fn create(&self, fields: PostFields) -> Result<BlogPost, RepoError>;

    /// Bulk variant of [`PostRepository::create`]. Nothing is written if any
    /// record fails validation.
    async fn insert_many(&self, records: Vec<PostFields>) -> Result<Vec<BlogPost>, RepoError>;

    /// Overwrite title, content and author of an existing post.
    ///
    /// Returns `Ok(false)` when no post exists under `id`.
    async fn replace_by_id(&self, id: Uuid, fields: PostFields) -> Result<bool, RepoError>;

    /// Remove every post, returning how many were removed.
    async fn drop_all(&self) -> Result<u64, RepoError>;
}
