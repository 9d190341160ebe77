//! Form validation layer
//!
//! Each entity has a binder that turns raw field-name → string-value input
//! into typed data or a per-field error map. Binding is pure: it reads only
//! the form's whitelisted fields and never touches storage. Reference checks
//! (does the selected category/article exist?) run separately as read-only
//! lookups before anything is persisted, so invalid input is never partially
//! applied.

pub mod article;
pub mod category;
pub mod comment;
pub mod tag;

pub use article::{ArticleData, ArticleForm};
pub use category::CategoryForm;
pub use comment::{ArticleCommentForm, CommentForm};
pub use tag::TagForm;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Raw form input as received from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawForm(HashMap<String, String>);

impl RawForm {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    /// The raw value of a field, if present.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The trimmed value of a field, `None` when absent or blank.
    pub fn trimmed(&self, field: &str) -> Option<&str> {
        self.value(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }
}

impl From<HashMap<String, String>> for RawForm {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}

/// Field name → human-readable messages, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Single-line rendering for error pages and logs.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Bind a required text field, enforcing a maximum length in characters.
pub(crate) fn required_text(
    raw: &RawForm,
    field: &str,
    max_chars: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    match raw.trimmed(field) {
        None => {
            errors.add(field, "this field is required");
            None
        }
        Some(value) if value.chars().count() > max_chars => {
            errors.add(field, format!("must be at most {} characters", max_chars));
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

/// Bind an optional text field, substituting `default` when blank.
pub(crate) fn optional_text(
    raw: &RawForm,
    field: &str,
    max_chars: usize,
    default: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match raw.trimmed(field) {
        None => Some(default.to_string()),
        Some(value) if value.chars().count() > max_chars => {
            errors.add(field, format!("must be at most {} characters", max_chars));
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

/// Bind a required reference field (an entity id).
pub(crate) fn required_reference(
    raw: &RawForm,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<i64> {
    match raw.trimmed(field) {
        None => {
            errors.add(field, "this field is required");
            None
        }
        Some(value) => match value.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(field, "select a valid choice");
                None
            }
        },
    }
}

/// Bind an optional reference field. Blank means "no reference".
pub(crate) fn optional_reference(
    raw: &RawForm,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Option<i64>> {
    match raw.trimmed(field) {
        None => Some(None),
        Some(value) => match value.parse::<i64>() {
            Ok(id) => Some(Some(id)),
            Err(_) => {
                errors.add(field, "select a valid choice");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawForm {
        RawForm::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let mut errors = FieldErrors::default();
        assert!(required_text(&raw(&[("title", "   ")]), "title", 200, &mut errors).is_none());
        assert!(errors.has("title"));
    }

    #[test]
    fn test_required_text_enforces_character_limit() {
        let mut errors = FieldErrors::default();
        let long = "x".repeat(201);
        assert!(required_text(&raw(&[("title", &long)]), "title", 200, &mut errors).is_none());
        assert_eq!(errors.messages("title"), ["must be at most 200 characters"]);

        let mut errors = FieldErrors::default();
        let exact = "x".repeat(200);
        assert_eq!(
            required_text(&raw(&[("title", &exact)]), "title", 200, &mut errors),
            Some(exact)
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::default();
        // 20 multibyte characters fit a 20-character limit
        let name = "я".repeat(20);
        assert_eq!(
            required_text(&raw(&[("name", &name)]), "name", 20, &mut errors),
            Some(name)
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_text_defaults_when_blank() {
        let mut errors = FieldErrors::default();
        assert_eq!(
            optional_text(&raw(&[]), "author", 40, "Anonymous", &mut errors),
            Some("Anonymous".to_string())
        );
        assert_eq!(
            optional_text(&raw(&[("author", "")]), "author", 40, "Anonymous", &mut errors),
            Some("Anonymous".to_string())
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_reference_fields_parse_ids() {
        let mut errors = FieldErrors::default();
        assert_eq!(
            required_reference(&raw(&[("article", "7")]), "article", &mut errors),
            Some(7)
        );
        assert_eq!(
            optional_reference(&raw(&[("category", "")]), "category", &mut errors),
            Some(None)
        );
        assert!(errors.is_empty());

        assert!(required_reference(&raw(&[("article", "seven")]), "article", &mut errors).is_none());
        assert!(errors.has("article"));
    }

    #[test]
    fn test_field_errors_merge_and_summary() {
        let mut a = FieldErrors::default();
        a.add("title", "this field is required");
        let mut b = FieldErrors::default();
        b.add("title", "second problem");
        b.add("text", "this field is required");
        a.merge(b);
        assert_eq!(a.messages("title").len(), 2);
        assert!(a.summary().contains("text: this field is required"));
    }
}
