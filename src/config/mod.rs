//! Configuration management
//!
//! Configuration is loaded from an optional `config.yml`; every field has a
//! default so a missing file yields a runnable setup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Template configuration
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Listing page sizes
    #[serde(default)]
    pub pages: PagesConfig,
}

impl Config {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "data/minipress.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

/// Template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding the Tera templates
    #[serde(default = "default_templates_path")]
    pub path: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

fn default_templates_path() -> String {
    "templates".to_string()
}

/// Listing page sizes and orphan thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Articles per index page
    #[serde(default = "default_articles_per_page")]
    pub articles_per_page: usize,
    /// Orphan threshold for the article index
    #[serde(default = "default_orphans")]
    pub articles_orphans: usize,
    /// Comments per index page
    #[serde(default = "default_comments_per_page")]
    pub comments_per_page: usize,
    /// Orphan threshold for the comment index
    #[serde(default = "default_orphans")]
    pub comments_orphans: usize,
    /// Comments per page on an article's detail page
    #[serde(default = "default_article_comments_per_page")]
    pub article_comments_per_page: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            articles_per_page: default_articles_per_page(),
            articles_orphans: default_orphans(),
            comments_per_page: default_comments_per_page(),
            comments_orphans: default_orphans(),
            article_comments_per_page: default_article_comments_per_page(),
        }
    }
}

fn default_articles_per_page() -> usize {
    4
}

fn default_comments_per_page() -> usize {
    6
}

fn default_article_comments_per_page() -> usize {
    3
}

fn default_orphans() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("does-not-exist.yml")).expect("load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pages.articles_per_page, 4);
        assert_eq!(config.pages.articles_orphans, 1);
        assert_eq!(config.templates.path, "templates");
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "server:\n  port: 9000\n").expect("write");

        let config = Config::load(&path).expect("load");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "data/minipress.db");
    }
}
