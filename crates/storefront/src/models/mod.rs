//! Data models for the storefront.

pub mod home;
pub mod session;
pub mod user;

pub use home::HomeContent;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
