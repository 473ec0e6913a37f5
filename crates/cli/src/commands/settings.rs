//! Store settings commands.
//!
//! Reads and writes the same settings documents the admin console
//! uses, including the rule that voice search cannot be enabled while
//! AI search is off. The server picks changes up on its next restart
//! or settings save; prefer the admin API on a live store.

use quickcart_core::SettingsUpdate;
use quickcart_storefront::db::SettingsRepository;

use super::{CliError, connect};

/// Print the current settings.
///
/// # Errors
///
/// Returns `CliError` if the connection or load fails.
pub async fn show() -> Result<(), CliError> {
    let pool = connect().await?;
    let settings = SettingsRepository::new(&pool).load().await?;

    tracing::info!(
        signups_enabled = settings.signups_enabled,
        ai_search_enabled = settings.ai_search_enabled,
        voice_search_enabled = settings.voice_search_enabled,
        "store settings"
    );
    Ok(())
}

/// Apply a partial settings update.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` when no flag was given, and
/// `CliError` if the load or save fails.
pub async fn set(update: SettingsUpdate) -> Result<(), CliError> {
    if update == SettingsUpdate::default() {
        return Err(CliError::InvalidInput(
            "nothing to change; pass at least one flag".to_owned(),
        ));
    }

    let pool = connect().await?;
    let repo = SettingsRepository::new(&pool);

    let next = repo.load().await?.apply(update);
    repo.save(next).await?;

    tracing::info!(
        signups_enabled = next.signups_enabled,
        ai_search_enabled = next.ai_search_enabled,
        voice_search_enabled = next.voice_search_enabled,
        "store settings updated"
    );
    Ok(())
}
