//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `sql` - SeaORM storage (`DatabasePool`, `SqlPostRepository`)
//! - `postgres` (default) - `sql` with the Postgres driver
//! - `sqlite` - `sql` with the SQLite driver, used by the test suites
//! - `seed` - random post generation for fixtures and demos

pub mod database;
pub mod memory;

#[cfg(any(test, feature = "seed"))]
pub mod seed;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "sql")]
pub use database::{DatabasePool, SqlPostRepository};
