//! Database migration command.
//!
//! Applies the storefront's embedded migrations plus the session-store
//! schema, matching what the server does at startup. Useful for
//! migrating before the first deploy or from CI.

use super::{CliError, connect};

/// Run all migrations against the store database.
///
/// # Errors
///
/// Returns `CliError` if the connection or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running store migrations...");
    quickcart_storefront::db::migrator().run(&pool).await?;

    tracing::info!("Migrating session store...");
    quickcart_storefront::middleware::session::create_session_store(&pool)
        .migrate()
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
