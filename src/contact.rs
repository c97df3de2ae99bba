//! Contact form.

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::validation::required_text;
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(custom = "required_text")]
    pub name: String,
    #[validate(email(message = "Por favor, insira um endereço de e-mail válido."))]
    pub email: String,
    /// The selected option's value. The placeholder option submits an empty string.
    #[validate(custom = "required_text")]
    pub subject: String,
    #[validate(custom = "required_text")]
    pub message: String,
}

/// Validates and accepts a contact message. Nothing is sent anywhere.
pub fn submit(form: &ContactForm) -> Result<()> {
    form.validate()?;
    info!(subject = %form.subject.trim(), from = %form.email, "contact message received");
    Ok(())
}
