//! Database connection pool
//!
//! Creates the SQLite pool from configuration. For file-backed databases the
//! parent directory is created on demand so a fresh checkout runs without
//! setup. Foreign keys are enabled per connection; the cascade and protect
//! rules in the schema depend on it.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// The connection pool handed to repositories.
pub type Db = SqlitePool;

/// Create a connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<Db> {
    connect(&config.url, config.max_connections).await
}

/// Create an in-memory pool for tests.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> Result<Db> {
    connect(":memory:", 1).await
}

async fn connect(url: &str, max_connections: u32) -> Result<Db> {
    let in_memory = url == ":memory:" || url.starts_with("sqlite::memory:");

    if !in_memory {
        let path = url.trim_start_matches("sqlite:");
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }
    }

    let connection_url = if url.starts_with("sqlite:") {
        url.to_string()
    } else if url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}", url)
    };

    let options = SqliteConnectOptions::from_str(&connection_url)
        .with_context(|| format!("Invalid database URL: {}", url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let max_connections = if in_memory { 1 } else { max_connections.max(1) };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn test_test_pool_answers_queries() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Ping should succeed");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enabled() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("Pragma query should succeed");
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_file_pool_creates_nested_directories() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("nested").join("dir").join("test.db");

        let config = DatabaseConfig {
            url: db_path.to_string_lossy().to_string(),
            max_connections: 5,
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");
        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Ping should succeed");
        assert!(db_path.exists());
    }
}
