use std::sync::Arc;

use api_server::render::JsonRenderer;
use api_server::{routes, AppState};
use application::BlogApp;
use config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("Starting blog server");

    // Load configuration from environment
    let config = Config::from_env();
    info!("Using database: {}", config.database_path);
    info!("Avatars stored under: {}", config.avatar_dir);

    let app = Arc::new(BlogApp::new(&config.database_path, &config.avatar_dir));
    let state = AppState {
        app,
        renderer: Arc::new(JsonRenderer),
        jwt_secret: config.jwt_secret.clone(),
    };

    let router = routes::build_router(state);

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);
    info!("Routes:");
    for (path, _, access) in routes::route_table() {
        info!("   {path} ({access:?})");
    }

    axum::serve(listener, router).await?;

    Ok(())
}
