use crate::errors::DomainError;
use crate::forms::{taken_message, validators, ValidationErrors};
use crate::repositories::UserRepository;

/// Sign-up form. Uniqueness checks query the store, per field, and only
/// when that field's shape validators passed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    fn field_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if let Err(message) = validators::required(&self.username) {
            errors.add("username", message);
        } else if let Err(message) = validators::length(&self.username, 2, 20) {
            errors.add("username", message);
        }

        if let Err(message) = validators::required(&self.email) {
            errors.add("email", message);
        } else if let Err(message) = validators::email_shape(&self.email) {
            errors.add("email", message);
        }

        if let Err(message) = validators::required(&self.password) {
            errors.add("password", message);
        }

        if let Err(message) = validators::required(&self.confirm_password) {
            errors.add("confirm_password", message);
        } else if let Err(message) =
            validators::equal_to(&self.confirm_password, &self.password, "password")
        {
            errors.add("confirm_password", message);
        }

        errors
    }

    pub async fn validate(&self, users: &dyn UserRepository) -> Result<(), DomainError> {
        let mut errors = self.field_errors();

        if !errors.contains("username") && users.find_by_username(&self.username).await?.is_some() {
            errors.add("username", taken_message("username"));
        }
        if !errors.contains("email") && users.find_by_email(&self.email).await?.is_some() {
            errors.add("email", taken_message("email"));
        }

        errors.into_result().map_err(DomainError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::User;
    use crate::repositories::MockUserRepository;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
            confirm_password: "pw1".to_string(),
        }
    }

    fn stored_alice() -> User {
        User::with_id(
            1,
            "alice".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn accepts_a_fresh_registration() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));

        assert!(valid_form().validate(&users).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_a_taken_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_alice())));
        users.expect_find_by_email().returning(|_| Ok(None));

        let err = valid_form().validate(&users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(
            errors.get("username"),
            Some("That username is taken. Please choose a different one.")
        );
    }

    #[tokio::test]
    async fn rejects_a_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_alice())));

        let err = valid_form().validate(&users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(
            errors.get("email"),
            Some("That email is taken. Please choose a different one.")
        );
    }

    #[tokio::test]
    async fn skips_the_store_lookup_when_shape_checks_fail() {
        // No expectations set: any repository call would panic the test.
        let users = MockUserRepository::new();

        let form = RegistrationForm {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
            password: String::new(),
            confirm_password: "mismatch".to_string(),
        };

        let err = form.validate(&users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert!(errors.contains("username"));
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
        assert!(errors.contains("confirm_password"));
    }

    #[tokio::test]
    async fn first_failing_validator_wins_per_field() {
        // Only the email field is still eligible for its store lookup.
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let form = RegistrationForm {
            username: String::new(),
            ..valid_form()
        };

        let err = form.validate(&users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("username"), Some("This field is required."));
    }
}
