pub mod memory_post_repository;
pub mod memory_user_repository;
pub mod sqlite_post_repository;
pub mod sqlite_user_repository;

pub use memory_post_repository::MemoryPostRepository;
pub use memory_user_repository::MemoryUserRepository;
pub use sqlite_post_repository::SqlitePostRepository;
pub use sqlite_user_repository::SqliteUserRepository;
