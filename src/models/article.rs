//! Article model
//!
//! This module provides:
//! - `Article` entity representing a blog article
//! - `ArticleInput` carrying the validated fields for create and edit flows
//!
//! The creation timestamp is immutable: repositories set it once on insert
//! and never include it in an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// Article title
    pub title: String,
    /// Article body, plain text
    pub text: String,
    /// Author display name
    pub author: String,
    /// Optional category reference
    pub category_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or editing an article.
///
/// Both flows carry the full editable field set; there are no partial
/// updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleInput {
    pub title: String,
    pub text: String,
    pub author: String,
    pub category_id: Option<i64>,
}
