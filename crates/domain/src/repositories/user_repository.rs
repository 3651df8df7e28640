use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::entities::User;
use crate::errors::DomainError;

/// Repository trait - defines what we need from persistence layer.
///
/// Username/email uniqueness is ultimately the store's job; `save` and
/// `update` report a violated constraint as [`DomainError::Conflict`]
/// with the offending field name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn save(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}
