use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published entry. `date_posted` is fixed at creation and survives
/// later edits unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<i32>, // None for new posts before persistence
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author_id: i32,
}

impl Post {
    pub fn new(title: String, content: String, author_id: i32) -> Self {
        Self {
            id: None,
            title,
            content,
            date_posted: Utc::now(),
            author_id,
        }
    }

    pub fn with_id(
        id: i32,
        title: String,
        content: String,
        date_posted: DateTime<Utc>,
        author_id: i32,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            content,
            date_posted,
            author_id,
        }
    }
}
