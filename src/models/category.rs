//! Category model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Validated input for creating or editing a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
}
