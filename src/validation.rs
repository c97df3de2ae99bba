//! Field rules shared by the storefront forms.

use std::borrow::Cow;

use validator::ValidationError;

const REQUIRED_MESSAGE: &str = "Este campo é obrigatório.";

/// Builds an error carrying the message shown next to the field.
pub(crate) fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Checks a text field is filled in, ignoring surrounding whitespace.
pub(crate) fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}
