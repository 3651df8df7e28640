use std::sync::Arc;

use application::BlogApp;

pub mod flash;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod session;

use render::Renderer;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<BlogApp>,
    pub renderer: Arc<dyn Renderer>,
    pub jwt_secret: String,
}
