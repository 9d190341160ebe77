//! Article form
//!
//! Whitelist: title, author, text, category, tags. The tags field is a
//! comma-separated list of names; duplicates collapse, each name is bounded
//! like a tag name.

use crate::models::{Article, ArticleInput, Tag};

use super::{optional_reference, required_text, FieldErrors, RawForm};

pub const TITLE_MAX: usize = 200;
pub const TEXT_MAX: usize = 3000;
pub const AUTHOR_MAX: usize = 40;
pub const TAG_MAX: usize = 31;

/// Bound article form data: the scalar input plus the tag names to sync.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleData {
    pub input: ArticleInput,
    pub tags: Vec<String>,
}

pub struct ArticleForm;

impl ArticleForm {
    /// Bind raw input to article data, or report per-field errors.
    pub fn bind(raw: &RawForm) -> Result<ArticleData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(raw, "title", TITLE_MAX, &mut errors);
        let author = required_text(raw, "author", AUTHOR_MAX, &mut errors);
        let text = required_text(raw, "text", TEXT_MAX, &mut errors);
        let category_id = optional_reference(raw, "category", &mut errors);
        let tags = parse_tags(raw.value("tags").unwrap_or(""), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ArticleData {
            input: ArticleInput {
                title: title.unwrap(),
                text: text.unwrap(),
                author: author.unwrap(),
                category_id: category_id.unwrap(),
            },
            tags: tags.unwrap(),
        })
    }

    /// Pre-fill raw values from an existing article, for the edit page.
    pub fn initial(article: &Article, tags: &[Tag]) -> RawForm {
        let mut raw = RawForm::default();
        raw.set("title", article.title.clone());
        raw.set("author", article.author.clone());
        raw.set("text", article.text.clone());
        if let Some(category_id) = article.category_id {
            raw.set("category", category_id.to_string());
        }
        raw.set(
            "tags",
            tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", "),
        );
        raw
    }
}

/// Split a comma-separated tag list into distinct, bounded names.
fn parse_tags(value: &str, errors: &mut FieldErrors) -> Option<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for name in value.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if name.chars().count() > TAG_MAX {
            errors.add("tags", format!("each tag must be at most {} characters", TAG_MAX));
            return None;
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawForm {
        RawForm::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_bind_valid_article() {
        let data = ArticleForm::bind(&raw(&[
            ("title", "Hello"),
            ("author", "Ann"),
            ("text", "World"),
            ("category", ""),
            ("tags", "rust, web, rust"),
        ]))
        .expect("binding should succeed");

        assert_eq!(data.input.title, "Hello");
        assert_eq!(data.input.author, "Ann");
        assert_eq!(data.input.category_id, None);
        assert_eq!(data.tags, ["rust", "web"]);
    }

    #[test]
    fn test_bind_collects_all_field_errors() {
        let errors = ArticleForm::bind(&raw(&[("title", "")])).unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("author"));
        assert!(errors.has("text"));
    }

    #[test]
    fn test_bind_ignores_fields_outside_the_whitelist() {
        let data = ArticleForm::bind(&raw(&[
            ("title", "Hello"),
            ("author", "Ann"),
            ("text", "World"),
            ("id", "999"),
            ("created_at", "1970-01-01"),
        ]))
        .expect("binding should succeed");
        // nothing from the stray fields leaks into the bound data
        assert_eq!(data.input.title, "Hello");
        assert!(data.tags.is_empty());
    }

    #[test]
    fn test_bind_rejects_overlong_tag() {
        let errors = ArticleForm::bind(&raw(&[
            ("title", "Hello"),
            ("author", "Ann"),
            ("text", "World"),
            ("tags", &"x".repeat(32)),
        ]))
        .unwrap_err();
        assert!(errors.has("tags"));
    }

    #[test]
    fn test_bind_rejects_non_numeric_category() {
        let errors = ArticleForm::bind(&raw(&[
            ("title", "Hello"),
            ("author", "Ann"),
            ("text", "World"),
            ("category", "news"),
        ]))
        .unwrap_err();
        assert_eq!(errors.messages("category"), ["select a valid choice"]);
    }
}
