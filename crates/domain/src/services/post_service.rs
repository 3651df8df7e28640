use std::sync::Arc;

use crate::entities::{Page, Post, User};
use crate::errors::DomainError;
use crate::forms::PostForm;
use crate::repositories::{PostRepository, UserRepository};

/// Feed page size, matching the rendered feeds.
pub const POSTS_PER_PAGE: u32 = 5;

/// Post workflows: feeds plus authorization-gated mutation.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// All posts, newest first.
    pub async fn home_feed(&self, page: u32) -> Result<Page<Post>, DomainError> {
        self.posts.list(page.max(1), POSTS_PER_PAGE).await
    }

    /// One author's posts, newest first. Fails with `NotFound` when the
    /// username does not resolve.
    pub async fn user_feed(
        &self,
        username: &str,
        page: u32,
    ) -> Result<(User, Page<Post>), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::NotFound("user"))?;
        let author_id = user.id.ok_or_else(unsaved_user)?;
        let posts = self
            .posts
            .list_by_author(author_id, page.max(1), POSTS_PER_PAGE)
            .await?;
        Ok((user, posts))
    }

    pub async fn create(&self, author: &User, form: &PostForm) -> Result<Post, DomainError> {
        form.validate().map_err(DomainError::Validation)?;
        let author_id = author.id.ok_or_else(unsaved_user)?;
        let post = Post::new(form.title.clone(), form.content.clone(), author_id);
        self.posts.save(&post).await
    }

    pub async fn get(&self, post_id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound("post"))
    }

    /// Resolve a post for mutation: `NotFound` when absent, `Forbidden`
    /// when the caller is not its author. Also used to prefill the edit
    /// form.
    pub async fn get_owned(&self, author_id: i32, post_id: i32) -> Result<Post, DomainError> {
        let post = self.get(post_id).await?;
        if post.author_id != author_id {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    /// Edit title and content; `date_posted` is never touched.
    pub async fn update(
        &self,
        author_id: i32,
        post_id: i32,
        form: &PostForm,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_owned(author_id, post_id).await?;
        form.validate().map_err(DomainError::Validation)?;
        post.title = form.title.clone();
        post.content = form.content.clone();
        self.posts.update(&post).await
    }

    pub async fn delete(&self, author_id: i32, post_id: i32) -> Result<(), DomainError> {
        let post = self.get_owned(author_id, post_id).await?;
        let id = post.id.ok_or_else(unsaved_post)?;
        self.posts.delete(id).await
    }
}

fn unsaved_user() -> DomainError {
    DomainError::Repository("user has no persisted id".to_string())
}

fn unsaved_post() -> DomainError {
    DomainError::Repository("post has no persisted id".to_string())
}
