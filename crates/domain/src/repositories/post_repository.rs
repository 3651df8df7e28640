use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::entities::{Page, Post};
use crate::errors::DomainError;

/// Repository trait for posts. Listings are ordered by `date_posted`
/// descending; `page` is 1-based.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError>;
    async fn list(&self, page: u32, per_page: u32) -> Result<Page<Post>, DomainError>;
    async fn list_by_author(
        &self,
        author_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Post>, DomainError>;
    async fn save(&self, post: &Post) -> Result<Post, DomainError>;
    async fn update(&self, post: &Post) -> Result<Post, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
