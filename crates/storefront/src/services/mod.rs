//! Application services for the storefront.

pub mod assistant;
pub mod auth;
pub mod settings;
pub mod voice;

pub use assistant::{AssistantError, SearchAssistantClient};
pub use auth::{AuthError, AuthService};
pub use settings::SettingsWatch;
