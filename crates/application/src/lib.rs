use domain::*;
use infrastructure::*;
use std::sync::Arc;

/// Blog application - wires repositories into the domain services.
pub struct BlogApp {
    pub accounts: AccountService,
    pub posts: PostService,
}

impl BlogApp {
    /// SQLite-backed wiring used by the server binary.
    pub fn new(database_path: &str, avatar_dir: &str) -> Self {
        // Infrastructure layer - database setup
        let database = Database::new(database_path);
        database.ensure_schema();
        let pool = database.get_pool().clone();

        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(SqlitePostRepository::new(pool));
        let avatars: Arc<dyn AvatarStore> = Arc::new(FsAvatarStore::new(avatar_dir));

        Self::with_parts(users, posts, avatars)
    }

    /// Explicit wiring; tests hand in the in-memory repositories here.
    pub fn with_parts(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        avatars: Arc<dyn AvatarStore>,
    ) -> Self {
        let accounts = AccountService::new(users.clone(), avatars);
        let posts = PostService::new(posts, users);

        Self { accounts, posts }
    }
}
