//! Page rendering boundary
//!
//! Handlers hand a template name and a context to the renderer and get HTML
//! back; markup never gets built in Rust.

use std::path::Path;

use anyhow::Context as _;
use axum::response::Html;
use tera::Tera;

use crate::error::Result;

/// Tera-backed page renderer
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load every template under `templates_dir`.
    pub fn new(templates_dir: &Path) -> anyhow::Result<Self> {
        let glob = format!("{}/**/*.html", templates_dir.display());
        let tera = Tera::new(&glob)
            .with_context(|| format!("Failed to load templates from {:?}", templates_dir))?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &tera::Context) -> Result<Html<String>> {
        Ok(Html(self.tera.render(template, context)?))
    }
}
