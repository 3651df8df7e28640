use crate::forms::{validators, ValidationErrors};

/// Login form. Shape checks only; whether the credentials are correct is
/// decided by the account service, not the form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(message) = validators::required(&self.email) {
            errors.add("email", message);
        } else if let Err(message) = validators::email_shape(&self.email) {
            errors.add("email", message);
        }

        if let Err(message) = validators::required(&self.password) {
            errors.add("password", message);
        }

        errors.into_result()
    }
}
