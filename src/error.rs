//! Request-level error taxonomy
//!
//! Every error here is recoverable at the request boundary: `NotFound` and
//! `Conflict` become user-visible error pages, `Validation` is consumed by
//! the form flow for a re-render, and storage/template failures end the
//! request with a 500.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::forms::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
    /// A path-referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Field-level validation failures. Normally handled by the form flow
    /// with a re-render; only reaches the response layer if a handler
    /// surfaces it directly.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// A delete was refused because other entities still reference the
    /// target.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Template(#[from] tera::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>Not found</h1><p>The requested {} does not exist.</p>", what)),
            )
                .into_response(),
            Error::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(format!("<h1>Invalid input</h1><p>{}</p>", errors.summary())),
            )
                .into_response(),
            Error::Conflict(message) => (
                StatusCode::CONFLICT,
                Html(format!("<h1>Conflict</h1><p>{}</p>", message)),
            )
                .into_response(),
            Error::Database(e) => {
                tracing::error!("database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Error::Template(e) => {
                tracing::error!("template error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
