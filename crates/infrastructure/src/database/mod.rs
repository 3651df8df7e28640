use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(database_path: &str) -> Self {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .build(manager)
            .expect("Failed to create SQLite connection pool");
        Database { pool }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables when missing. The UNIQUE constraints are the
    /// authoritative guard against duplicate usernames/emails; the
    /// form-level pre-check only exists to produce friendly messages.
    pub fn ensure_schema(&self) {
        let mut conn = self.pool.get().expect("Failed to get SQLite connection");

        diesel::sql_query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                image_file TEXT NOT NULL DEFAULT 'default.jpg',
                password_hash TEXT NOT NULL
            )",
        )
        .execute(&mut conn)
        .expect("Failed to create users table");

        diesel::sql_query(
            "CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                date_posted TIMESTAMP NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users (id)
            )",
        )
        .execute(&mut conn)
        .expect("Failed to create posts table");
    }
}
