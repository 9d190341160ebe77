//! Minipress - a small server-rendered blog system

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minipress::{
    config::Config,
    db::{
        self,
        repositories::{
            SqlxArticleRepository, SqlxCategoryRepository, SqlxCommentRepository,
            SqlxTagRepository,
        },
    },
    services::{ArticleService, CategoryService, CommentService, TagService},
    web::{self, AppState, PageRenderer},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minipress=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting minipress...");

    // Load configuration
    let config = Config::load(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database ready: {}", config.database.url);

    // Create repositories
    let article_repo = Arc::new(SqlxArticleRepository::new(pool.clone()));
    let category_repo = Arc::new(SqlxCategoryRepository::new(pool.clone()));
    let tag_repo = Arc::new(SqlxTagRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqlxCommentRepository::new(pool.clone()));

    // Initialize services
    let articles = Arc::new(ArticleService::new(
        article_repo.clone(),
        category_repo.clone(),
        tag_repo.clone(),
    ));
    let comments = Arc::new(CommentService::new(comment_repo, article_repo));
    let categories = Arc::new(CategoryService::new(category_repo));
    let tags = Arc::new(TagService::new(tag_repo));

    // Initialize template renderer
    let renderer = Arc::new(PageRenderer::new(Path::new(&config.templates.path))?);
    tracing::info!("Templates loaded from {}", config.templates.path);

    // Build application state and router
    let state = AppState {
        articles,
        comments,
        categories,
        tags,
        renderer,
        pages: config.pages.clone(),
    };
    let app = web::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
