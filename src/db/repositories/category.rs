//! Category repository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::Db;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryInput};

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: &CategoryInput) -> Result<Category>;

    /// Get a category by ID
    async fn find(&self, id: i64) -> Result<Option<Category>>;

    /// List all categories by name
    async fn list(&self) -> Result<Vec<Category>>;

    /// Rename a category
    async fn update(&self, id: i64, input: &CategoryInput) -> Result<Category>;

    /// Delete a category. Callers must check `article_count` first; the
    /// schema refuses the delete while articles still reference it.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Number of articles referencing this category
    async fn article_count(&self, id: i64) -> Result<i64>;
}

/// SQLx-based category repository implementation
pub struct SqlxCategoryRepository {
    pool: Db,
}

impl SqlxCategoryRepository {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

fn row_to_category(row: &SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&input.name)
            .execute(&self.pool)
            .await?;
        Ok(Category {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
        })
    }

    async fn find(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| row_to_category(&r)))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_category).collect())
    }

    async fn update(&self, id: i64, input: &CategoryInput) -> Result<Category> {
        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&input.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("category"));
        }
        Ok(Category {
            id,
            name: input.name.clone(),
        })
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn article_count(&self, id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE category_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
