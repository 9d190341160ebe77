//! Tag model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagInput {
    pub name: String,
}
