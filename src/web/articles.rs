//! Article pages
//!
//! Index with search and pagination, detail with paginated comments and the
//! in-context comment form, and the create/edit/delete flows.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tera::Context;

use crate::error::Result;
use crate::forms::{ArticleCommentForm, ArticleData, ArticleForm, FieldErrors, RawForm};
use crate::models::{Article, Comment};
use crate::pagination::Paginator;
use crate::services::{ArticleService, CommentService};

use super::form_flow::{self, form_context, FormResource, Submission};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles/add", get(create_form).post(create_submit))
        .route("/articles/{id}", get(detail))
        .route("/articles/{id}/edit", get(edit_form).post(edit_submit))
        .route("/articles/{id}/delete", get(delete_confirm).post(delete_submit))
        .route("/articles/{id}/comments/add", post(comment_submit))
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// GET / - article index with search and pagination
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response> {
    let paginator = Paginator::new(state.pages.articles_per_page, state.pages.articles_orphans);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let page = state
        .articles
        .search_page(search, query.page.unwrap_or(1), &paginator)
        .await?;

    let mut context = Context::new();
    context.insert("articles", &page.items);
    context.insert("page", &page);
    context.insert("search", search.unwrap_or(""));
    // carried into pagination links so the filter survives page changes
    let query_string = search
        .map(|s| format!("&search={}", urlencoding::encode(s)))
        .unwrap_or_default();
    context.insert("query_string", &query_string);

    Ok(state
        .renderer
        .render("article/index.html", &context)?
        .into_response())
}

/// GET /articles/{id} - article detail with paginated comments
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let article = state.articles.get(id).await?;
    render_detail(
        &state,
        article,
        query.page.unwrap_or(1),
        &RawForm::default(),
        &FieldErrors::default(),
    )
    .await
}

/// Render the detail page: the article, its category and tags, one page of
/// comments, and the in-context comment form.
async fn render_detail(
    state: &AppState,
    article: Article,
    comment_page: usize,
    values: &RawForm,
    errors: &FieldErrors,
) -> Result<Response> {
    let category = state.articles.category_of(&article).await?;
    let tags = state.articles.tags_of(article.id).await?;
    let paginator = Paginator::new(state.pages.article_comments_per_page, 0);
    let comments = state
        .comments
        .page_for_article(article.id, comment_page, &paginator)
        .await?;

    let mut context = form_context(values, errors);
    context.insert("article", &article);
    context.insert("category", &category);
    context.insert("tags", &tags);
    context.insert("comments", &comments.items);
    context.insert("page", &comments);

    Ok(state
        .renderer
        .render("article/detail.html", &context)?
        .into_response())
}

struct ArticleCreate<'a> {
    service: &'a ArticleService,
}

#[async_trait]
impl FormResource for ArticleCreate<'_> {
    type Data = ArticleData;
    type Entity = Article;

    fn bind(&self, raw: &RawForm) -> Result<ArticleData, FieldErrors> {
        ArticleForm::bind(raw)
    }

    async fn commit(&self, data: ArticleData) -> Result<Article> {
        self.service.create(data).await
    }

    fn success_url(&self, article: &Article) -> String {
        format!("/articles/{}", article.id)
    }
}

struct ArticleEdit<'a> {
    service: &'a ArticleService,
    id: i64,
}

#[async_trait]
impl FormResource for ArticleEdit<'_> {
    type Data = ArticleData;
    type Entity = Article;

    fn bind(&self, raw: &RawForm) -> Result<ArticleData, FieldErrors> {
        ArticleForm::bind(raw)
    }

    async fn commit(&self, data: ArticleData) -> Result<Article> {
        self.service.update(self.id, data).await
    }

    fn success_url(&self, article: &Article) -> String {
        format!("/articles/{}", article.id)
    }
}

async fn render_article_form(
    state: &AppState,
    template: &str,
    values: &RawForm,
    errors: &FieldErrors,
    article: Option<&Article>,
) -> Result<Response> {
    let categories = state.categories.list().await?;
    let mut context = form_context(values, errors);
    context.insert("categories", &categories);
    if let Some(article) = article {
        context.insert("article", article);
    }
    Ok(state.renderer.render(template, &context)?.into_response())
}

/// GET /articles/add - blank article form
pub async fn create_form(State(state): State<AppState>) -> Result<Response> {
    render_article_form(
        &state,
        "article/create.html",
        &RawForm::default(),
        &FieldErrors::default(),
        None,
    )
    .await
}

/// POST /articles/add - create an article
pub async fn create_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let raw = RawForm::new(fields);
    let resource = ArticleCreate {
        service: state.articles.as_ref(),
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_article_form(&state, "article/create.html", &raw, &errors, None).await
        }
    }
}

/// GET /articles/{id}/edit - article form pre-filled from the entity
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let article = state.articles.get(id).await?;
    let tags = state.articles.tags_of(id).await?;
    let values = ArticleForm::initial(&article, &tags);
    render_article_form(
        &state,
        "article/update.html",
        &values,
        &FieldErrors::default(),
        Some(&article),
    )
    .await
}

/// POST /articles/{id}/edit - overwrite an article's editable fields
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let article = state.articles.get(id).await?;
    let raw = RawForm::new(fields);
    let resource = ArticleEdit {
        service: state.articles.as_ref(),
        id,
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_article_form(&state, "article/update.html", &raw, &errors, Some(&article)).await
        }
    }
}

/// GET /articles/{id}/delete - confirmation page
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let article = state.articles.get(id).await?;
    let mut context = Context::new();
    context.insert("article", &article);
    Ok(state
        .renderer
        .render("article/delete.html", &context)?
        .into_response())
}

/// POST /articles/{id}/delete - delete and return to the index
pub async fn delete_submit(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    state.articles.delete(id).await?;
    Ok(Redirect::to("/").into_response())
}

struct ArticleCommentCreate<'a> {
    service: &'a CommentService,
    article_id: i64,
}

#[async_trait]
impl FormResource for ArticleCommentCreate<'_> {
    type Data = crate::models::CommentInput;
    type Entity = Comment;

    fn bind(&self, raw: &RawForm) -> Result<Self::Data, FieldErrors> {
        ArticleCommentForm::bind(self.article_id, raw)
    }

    async fn commit(&self, data: Self::Data) -> Result<Comment> {
        self.service.create(data).await
    }

    fn success_url(&self, comment: &Comment) -> String {
        format!("/articles/{}", comment.article_id)
    }
}

/// POST /articles/{id}/comments/add - comment on an article
///
/// The form on the detail page carries only author and text; the article
/// reference comes from the path.
pub async fn comment_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let article = state.articles.get(id).await?;
    let raw = RawForm::new(fields);
    let resource = ArticleCommentCreate {
        service: state.comments.as_ref(),
        article_id: id,
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => render_detail(&state, article, 1, &raw, &errors).await,
    }
}
