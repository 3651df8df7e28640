use std::sync::Arc;

use crate::avatar::AvatarStore;
use crate::entities::User;
use crate::errors::DomainError;
use crate::forms::{taken_message, LoginForm, RegistrationForm, UpdateAccountForm, ValidationErrors};
use crate::password;
use crate::repositories::UserRepository;

/// Account workflows: registration, credential checks and profile
/// updates.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    avatars: Arc<dyn AvatarStore>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, avatars: Arc<dyn AvatarStore>) -> Self {
        Self { users, avatars }
    }

    /// Create an account from a validated registration form. The form
    /// pre-check is best effort; a unique-constraint race at the store
    /// surfaces as the same field error the pre-check would have given.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, DomainError> {
        form.validate(self.users.as_ref()).await?;

        let password_hash = password::hash_password(&form.password)?;
        let user = User::new(form.username.clone(), form.email.clone(), password_hash);

        self.users.save(&user).await.map_err(conflict_to_validation)
    }

    /// Resolve credentials to a user. Unknown email and wrong password
    /// are indistinguishable from the caller's side.
    pub async fn authenticate(&self, form: &LoginForm) -> Result<Option<User>, DomainError> {
        form.validate().map_err(DomainError::Validation)?;

        let Some(user) = self.users.find_by_email(&form.email).await? else {
            return Ok(None);
        };
        if password::verify_password(&form.password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Apply a profile edit for the authenticated user. A new picture is
    /// thumbnailed and stored before the row is written; a crash between
    /// the two leaves an orphaned file, which is acceptable.
    pub async fn update_account(
        &self,
        current: &User,
        form: &UpdateAccountForm,
    ) -> Result<User, DomainError> {
        form.validate(current, self.users.as_ref()).await?;

        let mut updated = current.clone();
        if let Some(picture) = &form.picture {
            updated.image_file = self.avatars.store(picture).await?;
        }
        updated.username = form.username.clone();
        updated.email = form.email.clone();

        self.users
            .update(&updated)
            .await
            .map_err(conflict_to_validation)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        self.users.find_by_id(id).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.users.find_by_username(username).await
    }
}

fn conflict_to_validation(err: DomainError) -> DomainError {
    match err {
        DomainError::Conflict { field } => {
            DomainError::Validation(ValidationErrors::single(field, taken_message(field)))
        }
        other => other,
    }
}
