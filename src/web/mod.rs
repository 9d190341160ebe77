//! Web layer - server-rendered pages and routing
//!
//! One module per resource, each contributing its routes. Handlers collect
//! input, call the services, and hand a template name plus context to the
//! renderer.

pub mod articles;
pub mod categories;
pub mod comments;
pub mod form_flow;
pub mod render;
pub mod tags;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::PagesConfig;
use crate::services::{ArticleService, CategoryService, CommentService, TagService};

pub use render::PageRenderer;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<ArticleService>,
    pub comments: Arc<CommentService>,
    pub categories: Arc<CategoryService>,
    pub tags: Arc<TagService>,
    pub renderer: Arc<PageRenderer>,
    pub pages: PagesConfig,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(articles::index))
        .merge(articles::router())
        .merge(comments::router())
        .merge(categories::router())
        .merge(tags::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
