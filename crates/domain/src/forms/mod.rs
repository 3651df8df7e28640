pub mod account;
pub mod login;
pub mod post;
pub mod registration;
pub mod validators;

pub use account::UpdateAccountForm;
pub use login::LoginForm;
pub use post::PostForm;
pub use registration::RegistrationForm;

use std::collections::BTreeMap;

use serde::Serialize;

/// Field-keyed validation failures. Each field keeps the message of its
/// first failing validator; later failures for the same field are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub(crate) fn taken_message(field: &str) -> String {
    format!("That {field} is taken. Please choose a different one.")
}
