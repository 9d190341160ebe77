//! Article repository
//!
//! This module provides:
//! - `ArticleRepository` trait defining the interface for article data access
//! - `SqlxArticleRepository` implementing it on SQLite
//!
//! Listing is always ordered by creation time descending; the optional
//! search term matches title or author case-insensitively by substring.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::Db;
use crate::error::{Error, Result};
use crate::models::{Article, ArticleInput};

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Create a new article
    async fn create(&self, input: &ArticleInput) -> Result<Article>;

    /// Get an article by ID
    async fn find(&self, id: i64) -> Result<Option<Article>>;

    /// List all articles, newest first
    async fn list(&self) -> Result<Vec<Article>>;

    /// Count articles matching the optional search term
    async fn count(&self, search: Option<&str>) -> Result<i64>;

    /// Fetch one slice of articles matching the optional search term,
    /// newest first
    async fn search(&self, search: Option<&str>, offset: i64, limit: i64) -> Result<Vec<Article>>;

    /// Overwrite the editable fields of an article. The creation timestamp
    /// is never written.
    async fn update(&self, id: i64, input: &ArticleInput) -> Result<Article>;

    /// Delete an article. Comments and tag links go with it.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based article repository implementation
pub struct SqlxArticleRepository {
    pool: Db,
}

impl SqlxArticleRepository {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

fn row_to_article(row: &SqliteRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        author: row.get("author"),
        category_id: row.get("category_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Case-folded LIKE pattern with the wildcard characters escaped.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn create(&self, input: &ArticleInput) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO articles (title, text, author, category_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(&input.author)
        .bind(input.category_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            text: input.text.clone(),
            author: input.author.clone(),
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| row_to_article(&r)))
    }

    async fn list(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM articles ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn count(&self, search: Option<&str>) -> Result<i64> {
        let count = match search {
            Some(query) => {
                sqlx::query_scalar(
                    r#"SELECT COUNT(*) FROM articles
                       WHERE LOWER(title) LIKE ? ESCAPE '\' OR LOWER(author) LIKE ? ESCAPE '\'"#,
                )
                .bind(like_pattern(query))
                .bind(like_pattern(query))
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM articles")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn search(&self, search: Option<&str>, offset: i64, limit: i64) -> Result<Vec<Article>> {
        let rows = match search {
            Some(query) => {
                sqlx::query(
                    r#"SELECT * FROM articles
                       WHERE LOWER(title) LIKE ? ESCAPE '\' OR LOWER(author) LIKE ? ESCAPE '\'
                       ORDER BY created_at DESC, id DESC
                       LIMIT ? OFFSET ?"#,
                )
                .bind(like_pattern(query))
                .bind(like_pattern(query))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT * FROM articles
                       ORDER BY created_at DESC, id DESC
                       LIMIT ? OFFSET ?"#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn update(&self, id: i64, input: &ArticleInput) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"UPDATE articles
               SET title = ?, text = ?, author = ?, category_id = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(&input.author)
        .bind(input.category_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("article"));
        }
        self.find(id).await?.ok_or(Error::NotFound("article"))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxArticleRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxArticleRepository::new(pool)
    }

    fn input(title: &str, author: &str) -> ArticleInput {
        ArticleInput {
            title: title.to_string(),
            text: format!("Body of {}", title),
            author: author.to_string(),
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_sets_equal_timestamps() {
        let repo = setup_test_repo().await;
        let created = repo.create(&input("Hello", "Ann")).await.expect("create");

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find(created.id).await.expect("find").expect("present");
        assert_eq!(found.title, "Hello");
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = setup_test_repo().await;
        assert!(repo.find(99999).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let repo = setup_test_repo().await;
        let created = repo.create(&input("Hello", "Ann")).await.expect("create");

        let updated = repo
            .update(created.id, &input("Hello again", "Ann"))
            .await
            .expect("update");

        assert_eq!(updated.title, "Hello again");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = setup_test_repo().await;
        let err = repo.update(99999, &input("Hello", "Ann")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound("article")));
    }

    #[tokio::test]
    async fn test_search_matches_title_and_author_case_insensitively() {
        let repo = setup_test_repo().await;
        repo.create(&input("Rust ships", "Ann")).await.expect("create");
        repo.create(&input("Quiet day", "ANNETTE")).await.expect("create");
        repo.create(&input("Unrelated", "Bob")).await.expect("create");

        // "ann" hits one author exactly and one by substring, never the title-only row
        let hits = repo.search(Some("ann"), 0, 10).await.expect("search");
        assert_eq!(hits.len(), 2);
        assert_eq!(repo.count(Some("RUST")).await.expect("count"), 1);
        assert_eq!(repo.count(Some("nobody")).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_search_escapes_like_wildcards() {
        let repo = setup_test_repo().await;
        repo.create(&input("Fully 100% done", "Ann")).await.expect("create");
        repo.create(&input("Other", "Bob")).await.expect("create");

        assert_eq!(repo.count(Some("100%")).await.expect("count"), 1);
        // a bare wildcard must not match everything
        assert_eq!(repo.count(Some("%")).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = setup_test_repo().await;
        for n in 1..=3 {
            repo.create(&input(&format!("Article {}", n), "Ann"))
                .await
                .expect("create");
        }
        let listed = repo.list().await.expect("list");
        let titles: Vec<_> = listed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Article 3", "Article 2", "Article 1"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_test_repo().await;
        let created = repo.create(&input("Hello", "Ann")).await.expect("create");

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("second delete"));
        assert!(repo.find(created.id).await.expect("find").is_none());
    }
}
