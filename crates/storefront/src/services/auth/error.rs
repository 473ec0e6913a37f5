//! Authentication error types.

use thiserror::Error;

use quickcart_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password is wrong. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The email address is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
