pub mod avatar;
pub mod entities;
pub mod errors;
pub mod forms;
pub mod password;
pub mod repositories;
pub mod services;

pub use avatar::*;
pub use entities::*;
pub use errors::*;
pub use forms::{LoginForm, PostForm, RegistrationForm, UpdateAccountForm, ValidationErrors};
pub use password::*;
pub use repositories::*;
pub use services::*;
