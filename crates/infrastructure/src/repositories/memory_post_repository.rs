use std::sync::Mutex;

use async_trait::async_trait;
use domain::{DomainError, Page, Post, PostRepository};

/// In-memory post store for tests and demos.
#[derive(Default)]
pub struct MemoryPostRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    posts: Vec<Post>,
    next_id: i32,
}

fn window(mut posts: Vec<Post>, page: u32, per_page: u32) -> Page<Post> {
    posts.sort_by(|a, b| {
        b.date_posted
            .cmp(&a.date_posted)
            .then(b.id.cmp(&a.id))
    });
    let total = posts.len() as u64;
    let start = page.saturating_sub(1) as usize * per_page as usize;
    let items = posts
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();
    Page {
        items,
        page,
        per_page,
        total,
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError> {
        let state = self.state.lock().expect("post store lock poisoned");
        Ok(state.posts.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn list(&self, page: u32, per_page: u32) -> Result<Page<Post>, DomainError> {
        let state = self.state.lock().expect("post store lock poisoned");
        Ok(window(state.posts.clone(), page, per_page))
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Post>, DomainError> {
        let state = self.state.lock().expect("post store lock poisoned");
        let by_author = state
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(window(by_author, page, per_page))
    }

    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        let mut state = self.state.lock().expect("post store lock poisoned");
        state.next_id += 1;
        let mut saved = post.clone();
        saved.id = Some(state.next_id);
        state.posts.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let id = post
            .id
            .ok_or_else(|| DomainError::Repository("post has no persisted id".to_string()))?;

        let mut state = self.state.lock().expect("post store lock poisoned");
        let slot = state
            .posts
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(DomainError::NotFound("post"))?;
        *slot = post.clone();
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut state = self.state.lock().expect("post store lock poisoned");
        state.posts.retain(|p| p.id != Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    async fn seeded(count: u32) -> MemoryPostRepository {
        let repo = MemoryPostRepository::default();
        for day in 1..=count {
            let mut post = Post::new(format!("t{day}"), format!("c{day}"), 1);
            post.date_posted = Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap();
            repo.save(&post).await.unwrap();
        }
        repo
    }

    fn titles(page: &Page<Post>) -> Vec<&str> {
        page.items.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_newest_first_in_pages() {
        let repo = seeded(12).await;

        let first = repo.list(1, 5).await.unwrap();
        assert_eq!(titles(&first), vec!["t12", "t11", "t10", "t9", "t8"]);
        assert_eq!(first.total, 12);
        assert_eq!(first.total_pages(), 3);

        let last = repo.list(3, 5).await.unwrap();
        assert_eq!(titles(&last), vec!["t2", "t1"]);
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let repo = seeded(3).await;
        let page = repo.list(4, 5).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn filters_by_author() {
        let repo = seeded(2).await;
        let mut foreign = Post::new("other".to_string(), "c".to_string(), 2);
        foreign.date_posted = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        repo.save(&foreign).await.unwrap();

        let page = repo.list_by_author(1, 1, 5).await.unwrap();
        assert_eq!(titles(&page), vec!["t2", "t1"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = seeded(2).await;
        repo.delete(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert_eq!(repo.list(1, 5).await.unwrap().total, 1);
    }
}
