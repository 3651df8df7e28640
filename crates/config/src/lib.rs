use dotenv::dotenv;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub avatar_dir: String,
    pub jwt_secret: String,
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file
    /// first when one exists. Missing values fall back to development
    /// defaults; the SQLite file and avatar directory are created when
    /// absent.
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "blog.db".to_string());
        if !Path::new(&database_path).exists() {
            fs::File::create(&database_path).expect("Failed to create the database file");
        }

        let avatar_dir =
            env::var("AVATAR_DIR").unwrap_or_else(|_| "static/profile_pics".to_string());
        fs::create_dir_all(&avatar_dir).expect("Failed to create the avatar directory");

        Self {
            database_path,
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8000),
            avatar_dir,
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "insecure-dev-secret-change-me".to_string()),
        }
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
