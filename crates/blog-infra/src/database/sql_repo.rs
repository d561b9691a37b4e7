//! SQL post repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, map_db_err};

/// SeaORM-backed post repository (Postgres in production, SQLite in tests).
pub type SqlPostRepository = SqlBaseRepository<PostEntity, BlogPost>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, fields: PostFields) -> Result<BlogPost, RepoError> {
        let post = BlogPost::create(fields)?;

        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, "Created blog post");
        Ok(model.into())
    }

    async fn insert_many(&self, records: Vec<PostFields>) -> Result<Vec<BlogPost>, RepoError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let posts = records
            .into_iter()
            .map(BlogPost::create)
            .collect::<Result<Vec<_>, _>>()?;

        let inserted = PostEntity::insert_many(posts.iter().cloned().map(post::ActiveModel::from))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = inserted, "Inserted blog posts");
        Ok(posts)
    }

    async fn replace_by_id(&self, id: Uuid, fields: PostFields) -> Result<bool, RepoError> {
        fields.validate()?;

        let result = PostEntity::update_many()
            .set(post::ActiveModel {
                title: Set(fields.title),
                content: Set(fields.content),
                author_first_name: Set(fields.author.first_name),
                author_last_name: Set(fields.author.last_name),
                ..Default::default()
            })
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %id, rows = result.rows_affected, "Replaced blog post");
        Ok(result.rows_affected > 0)
    }

    async fn drop_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(rows = result.rows_affected, "Dropped all blog posts");
        Ok(result.rows_affected)
    }
}
