//! Category service
//!
//! Carries the referential protection rule: a category cannot be deleted
//! while articles still reference it.

use std::sync::Arc;

use crate::db::repositories::CategoryRepository;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryInput};

/// Category service
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, input: CategoryInput) -> Result<Category> {
        self.categories.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Category> {
        self.categories.find(id).await?.ok_or(Error::NotFound("category"))
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn update(&self, id: i64, input: CategoryInput) -> Result<Category> {
        self.categories.update(id, &input).await
    }

    /// Delete a category, refusing while it is still referenced.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let category = self.get(id).await?;
        let references = self.categories.article_count(id).await?;
        if references > 0 {
            return Err(Error::Conflict(format!(
                "category \"{}\" is still referenced by {} article(s)",
                category.name, references
            )));
        }
        self.categories.delete(id).await?;
        Ok(())
    }
}
