//! Generic form-driven create/edit flow
//!
//! Every create and edit operation follows the same state machine: render
//! the form, validate a submission, then either commit and redirect or
//! re-render the form with errors and the user's values. `FormResource`
//! is the per-resource configuration record (binder, commit, redirect rule);
//! `submit` drives the machine once for all of them.
//!
//! Binding is pure field validation. Reference checks run inside the
//! services at commit time, before anything is written; they surface as
//! `Error::Validation`, which `submit` folds back into the re-render path.

use async_trait::async_trait;
use tera::Context;

use crate::error::{Error, Result};
use crate::forms::{FieldErrors, RawForm};

/// Per-resource configuration for the shared form flow.
#[async_trait]
pub trait FormResource {
    type Data: Send;
    type Entity: Send;

    /// Bind raw input to typed data. Reads only the resource's whitelisted
    /// fields and never touches storage.
    fn bind(&self, raw: &RawForm) -> Result<Self::Data, FieldErrors>;

    /// Persist the validated data. The only side-effecting step; fails with
    /// `Error::Validation` when a referenced entity does not exist, without
    /// writing anything.
    async fn commit(&self, data: Self::Data) -> Result<Self::Entity>;

    /// Redirect target after a successful commit.
    fn success_url(&self, entity: &Self::Entity) -> String;
}

/// Outcome of a form submission.
pub enum Submission {
    /// Data committed; redirect here.
    Redirect(String),
    /// Validation failed; re-render with these errors.
    Invalid(FieldErrors),
}

/// Drive one submission through bind → commit.
pub async fn submit<R: FormResource>(resource: &R, raw: &RawForm) -> Result<Submission> {
    let data = match resource.bind(raw) {
        Ok(data) => data,
        Err(errors) => return Ok(Submission::Invalid(errors)),
    };

    match resource.commit(data).await {
        Ok(entity) => Ok(Submission::Redirect(resource.success_url(&entity))),
        Err(Error::Validation(errors)) => Ok(Submission::Invalid(errors)),
        Err(e) => Err(e),
    }
}

/// Base template context for a form page: the entered values and any
/// field errors.
pub fn form_context(values: &RawForm, errors: &FieldErrors) -> Context {
    let mut context = Context::new();
    context.insert("values", values);
    context.insert("errors", errors);
    context.insert("has_errors", &!errors.is_empty());
    context
}
