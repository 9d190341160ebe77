//! Category pages
//!
//! Index, create, edit, and delete. Deletes happen directly from the index
//! with no confirmation page, and are refused with a conflict response while
//! articles still reference the category.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use tera::Context;

use crate::error::Result;
use crate::forms::{CategoryForm, FieldErrors, RawForm};
use crate::models::{Category, CategoryInput};
use crate::services::CategoryService;

use super::form_flow::{self, form_context, FormResource, Submission};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(index))
        .route("/categories/add", get(create_form).post(create_submit))
        .route("/categories/{id}/edit", get(edit_form).post(edit_submit))
        .route("/categories/{id}/delete", post(delete_submit))
}

/// GET /categories - all categories by name
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let categories = state.categories.list().await?;
    let mut context = Context::new();
    context.insert("categories", &categories);
    Ok(state
        .renderer
        .render("category/index.html", &context)?
        .into_response())
}

struct CategoryCreate<'a> {
    service: &'a CategoryService,
}

#[async_trait]
impl FormResource for CategoryCreate<'_> {
    type Data = CategoryInput;
    type Entity = Category;

    fn bind(&self, raw: &RawForm) -> Result<CategoryInput, FieldErrors> {
        CategoryForm::bind(raw)
    }

    async fn commit(&self, data: CategoryInput) -> Result<Category> {
        self.service.create(data).await
    }

    fn success_url(&self, _category: &Category) -> String {
        "/categories".to_string()
    }
}

struct CategoryEdit<'a> {
    service: &'a CategoryService,
    id: i64,
}

#[async_trait]
impl FormResource for CategoryEdit<'_> {
    type Data = CategoryInput;
    type Entity = Category;

    fn bind(&self, raw: &RawForm) -> Result<CategoryInput, FieldErrors> {
        CategoryForm::bind(raw)
    }

    async fn commit(&self, data: CategoryInput) -> Result<Category> {
        self.service.update(self.id, data).await
    }

    fn success_url(&self, _category: &Category) -> String {
        "/categories".to_string()
    }
}

fn render_category_form(
    state: &AppState,
    template: &str,
    values: &RawForm,
    errors: &FieldErrors,
    category: Option<&Category>,
) -> Result<Response> {
    let mut context = form_context(values, errors);
    if let Some(category) = category {
        context.insert("category", category);
    }
    Ok(state.renderer.render(template, &context)?.into_response())
}

/// GET /categories/add - blank category form
pub async fn create_form(State(state): State<AppState>) -> Result<Response> {
    render_category_form(
        &state,
        "category/create.html",
        &RawForm::default(),
        &FieldErrors::default(),
        None,
    )
}

/// POST /categories/add - create a category
pub async fn create_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let raw = RawForm::new(fields);
    let resource = CategoryCreate {
        service: state.categories.as_ref(),
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_category_form(&state, "category/create.html", &raw, &errors, None)
        }
    }
}

/// GET /categories/{id}/edit - category form pre-filled from the entity
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let category = state.categories.get(id).await?;
    let values = CategoryForm::initial(&category);
    render_category_form(
        &state,
        "category/update.html",
        &values,
        &FieldErrors::default(),
        Some(&category),
    )
}

/// POST /categories/{id}/edit - rename a category
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response> {
    let category = state.categories.get(id).await?;
    let raw = RawForm::new(fields);
    let resource = CategoryEdit {
        service: state.categories.as_ref(),
        id,
    };
    match form_flow::submit(&resource, &raw).await? {
        Submission::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Submission::Invalid(errors) => {
            render_category_form(&state, "category/update.html", &raw, &errors, Some(&category))
        }
    }
}

/// POST /categories/{id}/delete - delete with no confirmation page
///
/// Refused with a conflict response while the category is referenced.
pub async fn delete_submit(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    state.categories.delete(id).await?;
    Ok(Redirect::to("/categories").into_response())
}
