//! Tag repository
//!
//! Tags and their article links. The join rows live here; deleting an
//! article or a tag removes its links through the schema's cascade rules.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::Db;
use crate::error::Result;
use crate::models::{Tag, TagInput};

/// Tag repository trait
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a new tag
    async fn create(&self, input: &TagInput) -> Result<Tag>;

    /// Get a tag by ID
    async fn find(&self, id: i64) -> Result<Option<Tag>>;

    /// Get a tag by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// List all tags by name
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Delete a tag and, through the schema, its article links
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Tags linked to an article
    async fn for_article(&self, article_id: i64) -> Result<Vec<Tag>>;

    /// Replace an article's tag links with exactly the given tags
    async fn set_for_article(&self, article_id: i64, tag_ids: &[i64]) -> Result<()>;

    /// Number of article links for a tag
    async fn link_count(&self, id: i64) -> Result<i64>;
}

/// SQLx-based tag repository implementation
pub struct SqlxTagRepository {
    pool: Db,
}

impl SqlxTagRepository {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

fn row_to_tag(row: &SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn create(&self, input: &TagInput) -> Result<Tag> {
        let now = Utc::now();
        let result = sqlx::query("INSERT INTO tags (name, created_at) VALUES (?, ?)")
            .bind(&input.name)
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(Tag {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            created_at: now,
        })
    }

    async fn find(&self, id: i64) -> Result<Option<Tag>> {
        let row = sqlx::query("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| row_to_tag(&r)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let row = sqlx::query("SELECT * FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| row_to_tag(&r)))
    }

    async fn list(&self) -> Result<Vec<Tag>> {
        let rows = sqlx::query("SELECT * FROM tags ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_tag).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn for_article(&self, article_id: i64) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT t.* FROM tags t
               JOIN article_tags at ON at.tag_id = t.id
               WHERE at.article_id = ?
               ORDER BY t.name, t.id"#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_tag).collect())
    }

    async fn set_for_article(&self, article_id: i64, tag_ids: &[i64]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM article_tags WHERE article_id = ?")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;
        for tag_id in tag_ids {
            sqlx::query("INSERT OR IGNORE INTO article_tags (article_id, tag_id) VALUES (?, ?)")
                .bind(article_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn link_count(&self, id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM article_tags WHERE tag_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{ArticleRepository, SqlxArticleRepository};
    use crate::db::{create_test_pool, migrations, Db};
    use crate::models::ArticleInput;

    async fn setup() -> (Db, SqlxTagRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let articles = SqlxArticleRepository::new(pool.clone());
        let article = articles
            .create(&ArticleInput {
                title: "Hello".to_string(),
                text: "World".to_string(),
                author: "Ann".to_string(),
                category_id: None,
            })
            .await
            .expect("create article");
        (pool.clone(), SqlxTagRepository::new(pool), article.id)
    }

    #[tokio::test]
    async fn test_create_and_find_by_name() {
        let (_pool, repo, _article_id) = setup().await;
        let created = repo
            .create(&TagInput { name: "rust".to_string() })
            .await
            .expect("create");

        let found = repo.find_by_name("rust").await.expect("find").expect("present");
        assert_eq!(found.id, created.id);
        assert!(repo.find_by_name("go").await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_set_for_article_replaces_links() {
        let (_pool, repo, article_id) = setup().await;
        let rust = repo.create(&TagInput { name: "rust".to_string() }).await.expect("create");
        let web = repo.create(&TagInput { name: "web".to_string() }).await.expect("create");

        repo.set_for_article(article_id, &[rust.id, web.id])
            .await
            .expect("set");
        let names: Vec<_> = repo
            .for_article(article_id)
            .await
            .expect("for_article")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["rust", "web"]);

        repo.set_for_article(article_id, &[web.id]).await.expect("set");
        let names: Vec<_> = repo
            .for_article(article_id)
            .await
            .expect("for_article")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["web"]);
    }

    #[tokio::test]
    async fn test_deleting_tag_removes_its_links() {
        let (_pool, repo, article_id) = setup().await;
        let rust = repo.create(&TagInput { name: "rust".to_string() }).await.expect("create");
        repo.set_for_article(article_id, &[rust.id]).await.expect("set");
        assert_eq!(repo.link_count(rust.id).await.expect("count"), 1);

        assert!(repo.delete(rust.id).await.expect("delete"));
        assert!(repo.for_article(article_id).await.expect("for_article").is_empty());
    }

    #[tokio::test]
    async fn test_deleting_article_removes_its_links() {
        let (pool, repo, article_id) = setup().await;
        let rust = repo.create(&TagInput { name: "rust".to_string() }).await.expect("create");
        repo.set_for_article(article_id, &[rust.id]).await.expect("set");

        let articles = SqlxArticleRepository::new(pool);
        assert!(articles.delete(article_id).await.expect("delete"));

        assert_eq!(repo.link_count(rust.id).await.expect("count"), 0);
        // the tag itself survives
        assert!(repo.find(rust.id).await.expect("find").is_some());
    }
}
