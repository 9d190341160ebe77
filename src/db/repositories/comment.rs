//! Comment repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::Db;
use crate::error::{Error, Result};
use crate::models::{Comment, CommentInput};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, input: &CommentInput) -> Result<Comment>;

    /// Get a comment by ID
    async fn find(&self, id: i64) -> Result<Option<Comment>>;

    /// Count all comments
    async fn count(&self) -> Result<i64>;

    /// Fetch one slice of all comments, newest first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Comment>>;

    /// Count comments under an article
    async fn count_for_article(&self, article_id: i64) -> Result<i64>;

    /// Fetch one slice of an article's comments, newest first
    async fn list_for_article(&self, article_id: i64, offset: i64, limit: i64)
        -> Result<Vec<Comment>>;

    /// Overwrite a comment's text and author. The owning article and the
    /// creation timestamp are never written.
    async fn update(&self, id: i64, input: &CommentInput) -> Result<Comment>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: Db,
}

impl SqlxCommentRepository {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

fn row_to_comment(row: &SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        article_id: row.get("article_id"),
        text: row.get("text"),
        author: row.get("author"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: &CommentInput) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO comments (article_id, text, author, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(input.article_id)
        .bind(&input.text)
        .bind(&input.author)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            article_id: input.article_id,
            text: input.text.clone(),
            author: input.author.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn find(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| row_to_comment(&r)))
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"SELECT * FROM comments
               ORDER BY created_at DESC, id DESC
               LIMIT ? OFFSET ?"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_comment).collect())
    }

    async fn count_for_article(&self, article_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE article_id = ?")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_for_article(
        &self,
        article_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"SELECT * FROM comments
               WHERE article_id = ?
               ORDER BY created_at DESC, id DESC
               LIMIT ? OFFSET ?"#,
        )
        .bind(article_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_comment).collect())
    }

    async fn update(&self, id: i64, input: &CommentInput) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE comments SET text = ?, author = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&input.text)
        .bind(&input.author)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("comment"));
        }
        self.find(id).await?.ok_or(Error::NotFound("comment"))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
