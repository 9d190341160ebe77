//! Tag form

use crate::models::TagInput;

use super::{required_text, FieldErrors, RawForm};

pub const NAME_MAX: usize = 31;

pub struct TagForm;

impl TagForm {
    pub fn bind(raw: &RawForm) -> Result<TagInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = required_text(raw, "name", NAME_MAX, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TagInput { name: name.unwrap() })
    }
}
