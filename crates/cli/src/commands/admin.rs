//! Admin grant management.
//!
//! Admin access is a flag on the user account; the account must exist
//! (register through the storefront first), then grant here.

use quickcart_core::Email;
use quickcart_storefront::db::UserRepository;

use super::{CliError, connect};

/// Set or clear the admin flag on an existing account.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for a malformed email and
/// `CliError::Repository` when the account does not exist.
pub async fn set_admin(email: &str, is_admin: bool) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;
    UserRepository::new(&pool).set_admin(&email, is_admin).await?;

    if is_admin {
        tracing::info!(email = %email.as_str(), "admin access granted");
    } else {
        tracing::info!(email = %email.as_str(), "admin access revoked");
    }
    Ok(())
}
