//! Comment pages
//!
//! Standalone comment management: a paginated index over all comments, a
//! full create form with an article choice, edit, and delete. Deleting
//! returns to the owning article's page.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tera::Context;

use crate::error::Result;
use crate::forms::{CommentForm, FieldErrors, RawForm};
use crate::models::{Comment, CommentInput};
use crate::pagination::Paginator;
use crate::services::CommentService;

use super::form_flow::{self, form_context, FormResource, Submission};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(index))
        .route("/comments/add", get(create_form).post(create_submit))
        .route("/comments/{id}/edit", get(edit_form).post(edit_submit))
        .route("/comments/{id}/delete", get(delete_confirm).post(delete_submit))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// GET /comments - all comments, newest first
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let paginator = Paginator::new(state.pages.comments_per_page, state.pages.comments_orphans);
    let page = state
        .comments
        .page(query.page.unwrap_or(1), &paginator)
        .await?;

    let mut context = Context::new();
    context.insert("comments", &page.items);
    context.insert("page", &page);
    Ok(state
        .renderer
        .render("comments/index.html", &context)?
        .into_response())
}

struct CommentCreate<'a> {
    service: &'a CommentService,
}

#[async_trait]
impl FormResource for CommentCreate<'_> {
    type Data = CommentInput;
    type Entity = Comment;

    fn bind(&self, raw: &RawForm) -> Result<CommentInput, FieldErrors> {
        CommentForm::bind(raw)
    }

    async fn commit(&self, data: CommentInput) -> Result<Comment> {
        self.service.create(data).await
    }

    fn success_url(&self, _comment: &Comment) -> String {
        "/comments".to_string()
    }
}

struct CommentEdit<'a> {
    service: &'a CommentService,
    id: i64,
}

#[async_trait]
impl FormResource for CommentEdit<'_> {
    type Data = CommentInput;
    type Entity = Comment;

    fn bind(&self, raw: &RawForm) -> Result<CommentInput, FieldErrors> {
        CommentForm::bind(raw)
    }

    async fn commit(&self, data: CommentInput) -> Result<Comment> {
        self.service.update(self.id, data).await
    }

    fn success_url(&self, _comment: &Comment) -> String {
        "/comments".to_string()
    }
}

async fn render_comment_form(
    state: &AppState,
    template: &str,
    values: &RawForm,
    errors: &FieldErrors,
    comment: Option<&Comment>,
) -> Result<Response> {
    let articles = state.articles.list().await?;
    let mut context = form_context(values, errors);
    context.insert("articles", &articles);
    if let Some(comment) = comment {
        context.insert("comment", comment);
    }
    Ok(state.renderer.render(template, &context)?.into_response())
}

/// GET /comments/add - blank comment form with an article choice
pub async fn create_form(State(state): State<AppState>) -> Result<Response> {
    render_comment_form(
        &state,
        "comments/create.html",
        &RawForm::default(),
        &FieldErrors::default(),
        None,
    )
    .await
}

/// POST /comments/add - create a comment
pub async fn create_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let raw = RawForm::new(fields);
    let resource = CommentCreate {
        service: state.comments.as_ref(),
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_comment_form(&state, "comments/create.html", &raw, &errors, None).await
        }
    }
}

/// GET /comments/{id}/edit - comment form pre-filled from the entity
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let comment = state.comments.get(id).await?;
    let values = CommentForm::initial(&comment);
    render_comment_form(
        &state,
        "comments/update.html",
        &values,
        &FieldErrors::default(),
        Some(&comment),
    )
    .await
}

/// POST /comments/{id}/edit - overwrite a comment's text and author
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let comment = state.comments.get(id).await?;
    let raw = RawForm::new(fields);
    let resource = CommentEdit {
        service: state.comments.as_ref(),
        id,
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_comment_form(&state, "comments/update.html", &raw, &errors, Some(&comment)).await
        }
    }
}

/// GET /comments/{id}/delete - confirmation page
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let comment = state.comments.get(id).await?;
    let mut context = Context::new();
    context.insert("comment", &comment);
    Ok(state
        .renderer
        .render("comments/delete.html", &context)?
        .into_response())
}

/// POST /comments/{id}/delete - delete and return to the owning article
pub async fn delete_submit(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let comment = state.comments.get(id).await?;
    state.comments.delete(id).await?;
    Ok(Redirect::to(&format!("/articles/{}", comment.article_id)).into_response())
}
