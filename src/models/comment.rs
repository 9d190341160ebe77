//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Owning article. Always valid; comments are deleted with the article.
    pub article_id: i64,
    pub text: String,
    /// Display name, "Anonymous" when the submitter left it blank.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or editing a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentInput {
    pub article_id: i64,
    pub text: String,
    pub author: String,
}
