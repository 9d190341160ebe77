//! Article service

use std::sync::Arc;

use crate::db::repositories::{ArticleRepository, CategoryRepository, TagRepository};
use crate::error::{Error, Result};
use crate::forms::{ArticleData, FieldErrors};
use crate::models::{Article, Category, Tag, TagInput};
use crate::pagination::{Page, Paginator};

/// Article service
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            articles,
            categories,
            tags,
        }
    }

    /// Check that the referenced category exists. Read-only.
    pub async fn verify_refs(&self, data: &ArticleData) -> Result<FieldErrors> {
        let mut errors = FieldErrors::default();
        if let Some(category_id) = data.input.category_id {
            if self.categories.find(category_id).await?.is_none() {
                errors.add("category", "select a valid choice");
            }
        }
        Ok(errors)
    }

    /// Persist a new article and sync its tag links. Fails with
    /// `Error::Validation` before writing anything when the referenced
    /// category does not exist.
    pub async fn create(&self, data: ArticleData) -> Result<Article> {
        let errors = self.verify_refs(&data).await?;
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        let article = self.articles.create(&data.input).await?;
        self.sync_tags(article.id, &data.tags).await?;
        Ok(article)
    }

    /// Overwrite an existing article's editable fields and sync its tags.
    /// The entity is untouched when validation fails.
    pub async fn update(&self, id: i64, data: ArticleData) -> Result<Article> {
        let errors = self.verify_refs(&data).await?;
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        let article = self.articles.update(id, &data.input).await?;
        self.sync_tags(article.id, &data.tags).await?;
        Ok(article)
    }

    pub async fn get(&self, id: i64) -> Result<Article> {
        self.articles.find(id).await?.ok_or(Error::NotFound("article"))
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        self.articles.list().await
    }

    /// One page of articles matching the optional search term, newest first.
    pub async fn search_page(
        &self,
        search: Option<&str>,
        page: usize,
        paginator: &Paginator,
    ) -> Result<Page<Article>> {
        let total = self.articles.count(search).await? as usize;
        let number = paginator.clamp(page, total);
        let (offset, limit) = paginator.bounds(number, total);
        let items = if limit == 0 {
            Vec::new()
        } else {
            self.articles.search(search, offset as i64, limit as i64).await?
        };
        Ok(Page::new(items, number, total, paginator.total_pages(total)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.articles.delete(id).await? {
            return Err(Error::NotFound("article"));
        }
        Ok(())
    }

    pub async fn tags_of(&self, article_id: i64) -> Result<Vec<Tag>> {
        self.tags.for_article(article_id).await
    }

    pub async fn category_of(&self, article: &Article) -> Result<Option<Category>> {
        match article.category_id {
            Some(category_id) => self.categories.find(category_id).await,
            None => Ok(None),
        }
    }

    /// Get-or-create each tag by name, then point the article's links at
    /// exactly that set.
    async fn sync_tags(&self, article_id: i64, names: &[String]) -> Result<()> {
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            let tag = match self.tags.find_by_name(name).await? {
                Some(tag) => tag,
                None => self.tags.create(&TagInput { name: name.clone() }).await?,
            };
            tag_ids.push(tag.id);
        }
        self.tags.set_for_article(article_id, &tag_ids).await
    }
}
