use crate::avatar::{AvatarUpload, ALLOWED_AVATAR_EXTENSIONS};
use crate::entities::User;
use crate::errors::DomainError;
use crate::forms::{taken_message, validators, ValidationErrors};
use crate::repositories::UserRepository;

/// Profile edit form. Uniqueness checks are skipped when the submitted
/// value equals the principal's stored value, so a no-op edit never
/// collides with itself.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountForm {
    pub username: String,
    pub email: String,
    pub picture: Option<AvatarUpload>,
}

impl UpdateAccountForm {
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

        if let Some(picture) = &self.picture {
            if let Err(message) =
                validators::allowed_extension(&picture.filename, ALLOWED_AVATAR_EXTENSIONS)
            {
                errors.add("picture", message);
            }
        }

        errors
    }

    pub async fn validate(
        &self,
        current: &User,
        users: &dyn UserRepository,
    ) -> Result<(), DomainError> {
        let mut errors = self.field_errors();

        if !errors.contains("username")
            && self.username != current.username
            && users.find_by_username(&self.username).await?.is_some()
        {
            errors.add("username", taken_message("username"));
        }
        if !errors.contains("email")
            && self.email != current.email
            && users.find_by_email(&self.email).await?.is_some()
        {
            errors.add("email", taken_message("email"));
        }

        errors.into_result().map_err(DomainError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn alice() -> User {
        User::with_id(
            1,
            "alice".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
        )
    }

    fn bob() -> User {
        User::with_id(
            2,
            "bob".to_string(),
            "b@x.com".to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn unchanged_values_skip_the_uniqueness_lookup() {
        // No expectations: a repository call would panic the test.
        let users = MockUserRepository::new();

        let form = UpdateAccountForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            picture: None,
        };
        assert!(form.validate(&alice(), &users).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_another_users_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(bob())));

        let form = UpdateAccountForm {
            username: "bob".to_string(),
            email: "a@x.com".to_string(),
            picture: None,
        };
        let err = form.validate(&alice(), &users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert!(errors.contains("username"));
    }

    #[tokio::test]
    async fn rejects_a_gif_avatar_before_any_processing() {
        let users = MockUserRepository::new();

        let form = UpdateAccountForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            picture: Some(AvatarUpload::new("cat.gif", vec![0x47, 0x49, 0x46])),
        };
        let err = form.validate(&alice(), &users).await.unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(
            errors.get("picture"),
            Some("File does not have an approved extension: jpg, png")
        );
    }
}
