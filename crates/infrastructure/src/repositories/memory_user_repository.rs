use std::sync::Mutex;

use async_trait::async_trait;
use domain::{DomainError, User, UserRepository};

/// In-memory user store for tests and demos. Mirrors the SQLite
/// repository's contract, including `Conflict` on duplicates.
#[derive(Default)]
pub struct MemoryUserRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    next_id: i32,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().expect("user store lock poisoned");
        Ok(state.users.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().expect("user store lock poisoned");
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().expect("user store lock poisoned");
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut state = self.state.lock().expect("user store lock poisoned");
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::Conflict { field: "username" });
        }
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict { field: "email" });
        }

        state.next_id += 1;
        let mut saved = user.clone();
        saved.id = Some(state.next_id);
        state.users.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let id = user
            .id
            .ok_or_else(|| DomainError::Repository("user has no persisted id".to_string()))?;

        let mut state = self.state.lock().expect("user store lock poisoned");
        if state
            .users
            .iter()
            .any(|u| u.id != Some(id) && u.username == user.username)
        {
            return Err(DomainError::Conflict { field: "username" });
        }
        if state
            .users
            .iter()
            .any(|u| u.id != Some(id) && u.email == user.email)
        {
            return Err(DomainError::Conflict { field: "email" });
        }

        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or(DomainError::NotFound("user"))?;
        *slot = user.clone();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User::new(username.to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let repo = MemoryUserRepository::default();
        let alice = repo.save(&user("alice", "a@x.com")).await.unwrap();
        let bob = repo.save(&user("bob", "b@x.com")).await.unwrap();
        assert_eq!(alice.id, Some(1));
        assert_eq!(bob.id, Some(2));
    }

    #[tokio::test]
    async fn save_rejects_duplicate_username_and_email() {
        let repo = MemoryUserRepository::default();
        repo.save(&user("alice", "a@x.com")).await.unwrap();

        let err = repo.save(&user("alice", "other@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: "username" }));

        let err = repo.save(&user("other", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: "email" }));
    }

    #[tokio::test]
    async fn update_allows_self_but_not_another_users_values() {
        let repo = MemoryUserRepository::default();
        let alice = repo.save(&user("alice", "a@x.com")).await.unwrap();
        repo.save(&user("bob", "b@x.com")).await.unwrap();

        // Writing back one's own values is not a collision.
        assert!(repo.update(&alice).await.is_ok());

        let mut renamed = alice.clone();
        renamed.username = "bob".to_string();
        let err = repo.update(&renamed).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field: "username" }));
    }
}
