//! Comment service

use std::sync::Arc;

use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::error::{Error, Result};
use crate::forms::FieldErrors;
use crate::models::{Comment, CommentInput};
use crate::pagination::{Page, Paginator};

/// Comment service
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, articles: Arc<dyn ArticleRepository>) -> Self {
        Self { comments, articles }
    }

    /// Check that the referenced article exists. Read-only.
    pub async fn verify_refs(&self, input: &CommentInput) -> Result<FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.articles.find(input.article_id).await?.is_none() {
            errors.add("article", "select a valid choice");
        }
        Ok(errors)
    }

    /// Persist a new comment. Fails with `Error::Validation` before writing
    /// anything when the referenced article does not exist.
    pub async fn create(&self, input: CommentInput) -> Result<Comment> {
        let errors = self.verify_refs(&input).await?;
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        self.comments.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Comment> {
        self.comments.find(id).await?.ok_or(Error::NotFound("comment"))
    }

    /// Overwrite a comment's text and author. The entity is untouched when
    /// validation fails.
    pub async fn update(&self, id: i64, input: CommentInput) -> Result<Comment> {
        let errors = self.verify_refs(&input).await?;
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        self.comments.update(id, &input).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.comments.delete(id).await? {
            return Err(Error::NotFound("comment"));
        }
        Ok(())
    }

    /// One page of all comments, newest first.
    pub async fn page(&self, page: usize, paginator: &Paginator) -> Result<Page<Comment>> {
        let total = self.comments.count().await? as usize;
        let number = paginator.clamp(page, total);
        let (offset, limit) = paginator.bounds(number, total);
        let items = if limit == 0 {
            Vec::new()
        } else {
            self.comments.list(offset as i64, limit as i64).await?
        };
        Ok(Page::new(items, number, total, paginator.total_pages(total)))
    }

    /// One page of an article's comments, newest first.
    pub async fn page_for_article(
        &self,
        article_id: i64,
        page: usize,
        paginator: &Paginator,
    ) -> Result<Page<Comment>> {
        let total = self.comments.count_for_article(article_id).await? as usize;
        let number = paginator.clamp(page, total);
        let (offset, limit) = paginator.bounds(number, total);
        let items = if limit == 0 {
            Vec::new()
        } else {
            self.comments
                .list_for_article(article_id, offset as i64, limit as i64)
                .await?
        };
        Ok(Page::new(items, number, total, paginator.total_pages(total)))
    }
}
