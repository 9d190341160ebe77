//! Tag pages
//!
//! Index, create, and delete. Deletes happen directly from the index with no
//! confirmation page; the schema removes the tag's article links with it.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use tera::Context;

use crate::error::Result;
use crate::forms::{FieldErrors, RawForm, TagForm};
use crate::models::{Tag, TagInput};
use crate::services::TagService;

use super::form_flow::{self, form_context, FormResource, Submission};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(index))
        .route("/tags/add", get(create_form).post(create_submit))
        .route("/tags/{id}/delete", post(delete_submit))
}

/// GET /tags - all tags by name
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let tags = state.tags.list().await?;
    let mut context = Context::new();
    context.insert("tags", &tags);
    Ok(state
        .renderer
        .render("tag/index.html", &context)?
        .into_response())
}

struct TagCreate<'a> {
    service: &'a TagService,
}

#[async_trait]
impl FormResource for TagCreate<'_> {
    type Data = TagInput;
    type Entity = Tag;

    fn bind(&self, raw: &RawForm) -> Result<TagInput, FieldErrors> {
        TagForm::bind(raw)
    }

    async fn commit(&self, data: TagInput) -> Result<Tag> {
        self.service.create(data).await
    }

    fn success_url(&self, _tag: &Tag) -> String {
        "/tags".to_string()
    }
}

fn render_tag_form(state: &AppState, values: &RawForm, errors: &FieldErrors) -> Result<Response> {
    let context = form_context(values, errors);
    Ok(state
        .renderer
        .render("tag/create.html", &context)?
        .into_response())
}

/// GET /tags/add - blank tag form
pub async fn create_form(State(state): State<AppState>) -> Result<Response> {
    render_tag_form(&state, &RawForm::default(), &FieldErrors::default())
}

/// POST /tags/add - create a tag
pub async fn create_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let raw = RawForm::new(fields);
    let resource = TagCreate {
        service: state.tags.as_ref(),
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => render_tag_form(&state, &raw, &errors),
    }
}

/// POST /tags/{id}/delete - delete with no confirmation page
pub async fn delete_submit(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    state.tags.delete(id).await?;
    Ok(Redirect::to("/tags").into_response())
}
