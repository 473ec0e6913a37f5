//! User account model.

use chrono::{DateTime, Utc};

use quickcart_core::{Email, UserId};

/// A registered user.
///
/// The argon2 hash never leaves the auth service; this struct is not
/// serializable on purpose.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: String,
    /// Grants access to the admin routes.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
