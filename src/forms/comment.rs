//! Comment forms
//!
//! Two binders share the field rules. `CommentForm` is the standalone form
//! with an article choice; `ArticleCommentForm` is used on an article's
//! detail page, where the whitelist shrinks to {author, text} and the
//! article reference comes from the URL, never from the submitted fields.

use crate::models::{Comment, CommentInput};

use super::{optional_text, required_reference, required_text, FieldErrors, RawForm};

pub const TEXT_MAX: usize = 400;
pub const AUTHOR_MAX: usize = 40;
pub const DEFAULT_AUTHOR: &str = "Anonymous";

pub struct CommentForm;

impl CommentForm {
    pub fn bind(raw: &RawForm) -> Result<CommentInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let article_id = required_reference(raw, "article", &mut errors);
        let text = required_text(raw, "text", TEXT_MAX, &mut errors);
        let author = optional_text(raw, "author", AUTHOR_MAX, DEFAULT_AUTHOR, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CommentInput {
            article_id: article_id.unwrap(),
            text: text.unwrap(),
            author: author.unwrap(),
        })
    }

    /// Pre-fill raw values from an existing comment, for the edit page.
    pub fn initial(comment: &Comment) -> RawForm {
        let mut raw = RawForm::default();
        raw.set("article", comment.article_id.to_string());
        raw.set("text", comment.text.clone());
        raw.set("author", comment.author.clone());
        raw
    }
}

pub struct ArticleCommentForm;

impl ArticleCommentForm {
    /// Bind a comment submitted under `article_id`. Only author and text are
    /// read from the input; a submitted "article" field is ignored.
    pub fn bind(article_id: i64, raw: &RawForm) -> Result<CommentInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let text = required_text(raw, "text", TEXT_MAX, &mut errors);
        let author = optional_text(raw, "author", AUTHOR_MAX, DEFAULT_AUTHOR, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CommentInput {
            article_id,
            text: text.unwrap(),
            author: author.unwrap(),
        })
    }
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
    fn test_bind_defaults_author_to_anonymous() {
        let input = CommentForm::bind(&raw(&[("article", "1"), ("text", "Nice")])).unwrap();
        assert_eq!(input.author, "Anonymous");
    }

    #[test]
    fn test_bind_requires_text_and_article() {
        let errors = CommentForm::bind(&raw(&[("author", "Bob")])).unwrap_err();
        assert!(errors.has("article"));
        assert!(errors.has("text"));
        assert!(!errors.has("author"));
    }

    #[test]
    fn test_bind_enforces_text_limit() {
        let long = "x".repeat(401);
        let errors = CommentForm::bind(&raw(&[("article", "1"), ("text", &long)])).unwrap_err();
        assert_eq!(errors.messages("text"), ["must be at most 400 characters"]);
    }

    #[test]
    fn test_article_context_form_ignores_submitted_article_field() {
        let input = ArticleCommentForm::bind(
            5,
            &raw(&[("article", "9999"), ("text", "Nice"), ("author", "Bob")]),
        )
        .unwrap();
        // the path-derived article wins over anything in the form body
        assert_eq!(input.article_id, 5);
        assert_eq!(input.author, "Bob");
    }
}
