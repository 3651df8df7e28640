pub mod account_service;
pub mod post_service;

pub use account_service::AccountService;
pub use post_service::PostService;
