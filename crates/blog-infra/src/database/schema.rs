//! Schema bootstrap from entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::post::Entity as PostEntity;

/// Create the `blog_posts` table if it does not exist yet.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(PostEntity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(?backend, "Ensured blog_posts table");
    Ok(())
}
