//! Database layer
//!
//! SQLite persistence via sqlx: connection pool creation, code-based
//! embedded migrations, and per-entity repositories. Relationship rules
//! (cascade on article delete, protect on referenced categories) are
//! declared in the schema and enforced with foreign keys enabled on every
//! connection.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, Db};
