//! Tag service

use std::sync::Arc;

use crate::db::repositories::TagRepository;
use crate::error::{Error, Result};
use crate::forms::FieldErrors;
use crate::models::{Tag, TagInput};

/// Tag service
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Persist a new tag. Tag names are unique; a duplicate fails with
    /// `Error::Validation` before writing anything.
    pub async fn create(&self, input: TagInput) -> Result<Tag> {
        let mut errors = FieldErrors::default();
        if self.tags.find_by_name(&input.name).await?.is_some() {
            errors.add("name", "a tag with this name already exists");
        }
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        self.tags.create(&input).await
    }

    pub async fn list(&self) -> Result<Vec<Tag>> {
        self.tags.list().await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.tags.delete(id).await? {
            return Err(Error::NotFound("tag"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxTagRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> TagService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        TagService::new(Arc::new(SqlxTagRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_create_refuses_duplicate_names() {
        let service = setup().await;
        service
            .create(TagInput { name: "rust".to_string() })
            .await
            .expect("create");

        let err = service
            .create(TagInput { name: "rust".to_string() })
            .await
            .unwrap_err();
        match err {
            Error::Validation(errors) => assert!(errors.has("name")),
            other => panic!("expected validation error, got {:?}", other),
        }

        service
            .create(TagInput { name: "web".to_string() })
            .await
            .expect("distinct name is fine");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = setup().await;
        assert!(matches!(
            service.delete(7).await.unwrap_err(),
            Error::NotFound("tag")
        ));
    }
}
