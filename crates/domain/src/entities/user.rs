use serde::{Deserialize, Serialize};

/// Avatar assigned at registration, served from the static asset area.
pub const DEFAULT_AVATAR: &str = "default.jpg";

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i32>, // None for new users before persistence
    pub username: String,
    pub email: String,
    pub image_file: String,

    #[serde(skip_serializing, default)] // never include the hash in rendered contexts
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            email,
            image_file: DEFAULT_AVATAR.to_string(),
            password_hash,
        }
    }

    pub fn with_id(id: i32, username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Some(id),
            username,
            email,
            image_file: DEFAULT_AVATAR.to_string(),
            password_hash,
        }
    }
}
