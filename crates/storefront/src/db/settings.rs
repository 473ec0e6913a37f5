//! Settings repository.
//!
//! Feature toggles live in a key/value table of JSONB documents, two of
//! which matter here: `signup` (`{"isEnabled": bool}`) and `search`
//! (`{"isAIEnabled": bool, "isVoiceEnabled": bool}`). A missing document
//! means its defaults apply.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use quickcart_core::StoreSettings;

use super::RepositoryError;

const SIGNUP_KEY: &str = "signup";
const SEARCH_KEY: &str = "search";

#[derive(Serialize, Deserialize)]
struct SignupDoc {
    #[serde(rename = "isEnabled")]
    is_enabled: bool,
}

#[derive(Serialize, Deserialize)]
struct SearchDoc {
    #[serde(rename = "isAIEnabled")]
    is_ai_enabled: bool,
    #[serde(rename = "isVoiceEnabled")]
    is_voice_enabled: bool,
}

/// Repository for settings documents.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the current settings, falling back to defaults for any
    /// missing or unreadable document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn load(&self) -> Result<StoreSettings, RepositoryError> {
        let mut settings = StoreSettings::default();

        if let Some(value) = self.fetch(SIGNUP_KEY).await?
            && let Ok(doc) = serde_json::from_value::<SignupDoc>(value)
        {
            settings.signups_enabled = doc.is_enabled;
        }
        if let Some(value) = self.fetch(SEARCH_KEY).await?
            && let Ok(doc) = serde_json::from_value::<SearchDoc>(value)
        {
            settings.ai_search_enabled = doc.is_ai_enabled;
            settings.voice_search_enabled = doc.is_voice_enabled;
        }

        Ok(settings)
    }

    /// Persist both settings documents in one transaction.
    ///
    /// Callers are expected to have applied the toggle dependency rule
    /// already (`StoreSettings::apply` does); storing both documents
    /// together keeps the AI and voice flags from drifting apart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a write fails, and
    /// `RepositoryError::DataCorruption` if a document fails to serialize.
    pub async fn save(&self, settings: StoreSettings) -> Result<(), RepositoryError> {
        let signup = serde_json::to_value(SignupDoc {
            is_enabled: settings.signups_enabled,
        })
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let search = serde_json::to_value(SearchDoc {
            is_ai_enabled: settings.ai_search_enabled,
            is_voice_enabled: settings.voice_search_enabled,
        })
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let mut tx = self.pool.begin().await?;
        for (key, value) in [(SIGNUP_KEY, signup), (SEARCH_KEY, search)] {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES ($1, $2)
                 ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        Ok(value)
    }
}
