use crate::forms::{validators, ValidationErrors};

/// Shared by the new-post and edit-post flows.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(message) = validators::required(&self.title) {
            errors.add("title", message);
        } else if let Err(message) = validators::max_length(&self.title, 100) {
            errors.add("title", message);
        }

        if let Err(message) = validators::required(&self.content) {
            errors.add("content", message);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_title_and_content() {
        let form = PostForm {
            title: "T1".to_string(),
            content: "C1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn rejects_missing_fields_and_oversized_title() {
        let form = PostForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("content"));

        let form = PostForm {
            title: "x".repeat(101),
            content: "C1".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some("Field cannot be longer than 100 characters.")
        );
    }
}
