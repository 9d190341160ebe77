//! Category form

use crate::models::{Category, CategoryInput};

use super::{required_text, FieldErrors, RawForm};

pub const NAME_MAX: usize = 20;

pub struct CategoryForm;

impl CategoryForm {
    pub fn bind(raw: &RawForm) -> Result<CategoryInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = required_text(raw, "name", NAME_MAX, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CategoryInput { name: name.unwrap() })
    }

    pub fn initial(category: &Category) -> RawForm {
        let mut raw = RawForm::default();
        raw.set("name", category.name.clone());
        raw
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
    fn test_bind_trims_and_accepts() {
        let input = CategoryForm::bind(&raw(&[("name", "  News  ")])).unwrap();
        assert_eq!(input.name, "News");
    }

    #[test]
    fn test_bind_enforces_name_limit() {
        let errors = CategoryForm::bind(&raw(&[("name", &"x".repeat(21))])).unwrap_err();
        assert!(errors.has("name"));
    }
}
