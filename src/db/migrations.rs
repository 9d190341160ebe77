//! Database migrations
//!
//! Code-based migrations embedded in the binary. Each migration is a
//! `Migration` record with a unique sequential version; applied versions are
//! tracked in a `_migrations` table and pending ones run in order at
//! startup.

use anyhow::{Context, Result};
use sqlx::Row;

use super::Db;

/// A database migration.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements to apply
    pub up: &'static str,
}

/// All migrations, in order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_categories",
        up: r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(20) NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_articles",
        up: r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(200) NOT NULL,
                text TEXT NOT NULL,
                author VARCHAR(40) NOT NULL DEFAULT 'Unknown',
                category_id INTEGER REFERENCES categories(id) ON DELETE RESTRICT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles(created_at);
            CREATE INDEX IF NOT EXISTS idx_articles_category ON articles(category_id);
        "#,
    },
    Migration {
        version: 3,
        name: "create_tags",
        up: r#"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(31) NOT NULL UNIQUE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
    Migration {
        version: 4,
        name: "create_article_tags",
        up: r#"
            CREATE TABLE IF NOT EXISTS article_tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
                tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                UNIQUE (article_id, tag_id)
            );
            CREATE INDEX IF NOT EXISTS idx_article_tags_article ON article_tags(article_id);
            CREATE INDEX IF NOT EXISTS idx_article_tags_tag ON article_tags(tag_id);
        "#,
    },
    Migration {
        version: 5,
        name: "create_comments",
        up: r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
                text VARCHAR(400) NOT NULL,
                author VARCHAR(40) NOT NULL DEFAULT 'Anonymous',
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_comments_article ON comments(article_id);
            CREATE INDEX IF NOT EXISTS idx_comments_created_at ON comments(created_at);
        "#,
    },
];

/// Run all pending migrations.
pub async fn run_migrations(pool: &Db) -> Result<()> {
    create_migrations_table(pool).await?;

    let applied = applied_versions(pool).await?;
    for migration in MIGRATIONS {
        if applied.contains(&(migration.version as i64)) {
            continue;
        }
        tracing::info!("Applying migration {}: {}", migration.version, migration.name);
        apply_migration(pool, migration)
            .await
            .with_context(|| format!("Migration {} ({}) failed", migration.version, migration.name))?;
    }

    Ok(())
}

async fn create_migrations_table(pool: &Db) -> Result<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )"#,
    )
    .execute(pool)
    .await
    .context("Failed to create migrations table")?;
    Ok(())
}

async fn applied_versions(pool: &Db) -> Result<Vec<i64>> {
    let rows = sqlx::query("SELECT version FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(|row| row.get("version")).collect())
}

async fn apply_migration(pool: &Db, migration: &Migration) -> Result<()> {
    // The SQL may contain multiple statements; execute them one at a time.
    for statement in split_sql_statements(migration.up) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

/// Split SQL into individual statements.
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_run_migrations_creates_all_tables() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Migrations should run");

        for table in ["categories", "articles", "tags", "article_tags", "comments"] {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .expect("Schema query should succeed");
            assert_eq!(count, 1, "table {} should exist", table);
        }
    }

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("First run should succeed");
        run_migrations(&pool).await.expect("Second run should succeed");

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&pool)
            .await
            .expect("Count should succeed");
        assert_eq!(applied as usize, MIGRATIONS.len());
    }

    #[test]
    fn test_versions_are_unique_and_sequential() {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version, i as i32 + 1);
        }
    }

    #[test]
    fn test_split_sql_statements_drops_blanks() {
        let statements = split_sql_statements("CREATE TABLE a (id INTEGER);\n\nCREATE INDEX b ON a(id);\n");
        assert_eq!(statements.len(), 2);
    }
}
