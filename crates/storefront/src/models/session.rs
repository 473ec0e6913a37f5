//! Session-stored types.

use serde::{Deserialize, Serialize};

use quickcart_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal snapshot kept in the session to identify the logged-in user.
/// The admin flag is captured at login time; re-login refreshes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Whether the user may access the admin routes.
    pub is_admin: bool,
}

impl From<&super::User> for CurrentUser {
    fn from(user: &super::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the serialized cart state. This is the single fixed
    /// namespace key the cart store persists under.
    pub const CART: &str = "cart";
}
