pub mod avatar;
pub mod database;
pub mod repositories;

pub use avatar::*;
pub use database::*;
pub use repositories::*;
