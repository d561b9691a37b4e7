//! SQL storage: connection management, entities and repositories.

mod connections;

#[cfg(feature = "sql")]
pub mod entity;
#[cfg(feature = "sql")]
mod schema;
#[cfg(feature = "sql")]
mod sql_base;
#[cfg(feature = "sql")]
mod sql_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "sql")]
pub use connections::DatabasePool;
#[cfg(feature = "sql")]
pub use schema::ensure_schema;
#[cfg(feature = "sql")]
pub use sql_base::SqlBaseRepository;
#[cfg(feature = "sql")]
pub use sql_repo::SqlPostRepository;
