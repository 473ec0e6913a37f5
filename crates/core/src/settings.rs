//! Store feature toggles.
//!
//! Voice search rides on top of AI search: the transcript produced by the
//! speech socket is only useful once the assistant can normalize it, so a
//! store can never have voice enabled while AI is disabled. That rule is
//! enforced here, at toggle time, so every write path (admin routes, CLI)
//! shares it.

use serde::{Deserialize, Serialize};

/// Global store settings.
///
/// Defaults apply until the first stored snapshot is loaded, and when the
/// backing documents do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// Whether new users may register accounts.
    pub signups_enabled: bool,
    /// Whether free-text search is normalized by the remote assistant.
    pub ai_search_enabled: bool,
    /// Whether the voice search relay is available. Requires AI search.
    pub voice_search_enabled: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            signups_enabled: true,
            ai_search_enabled: true,
            voice_search_enabled: true,
        }
    }
}

/// A partial settings change; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub signups_enabled: Option<bool>,
    pub ai_search_enabled: Option<bool>,
    pub voice_search_enabled: Option<bool>,
}

impl StoreSettings {
    /// Apply a partial update, returning the resulting settings.
    ///
    /// Disabling AI search forces voice search off in the same update, and
    /// a request to enable voice search while AI search is (or becomes)
    /// disabled is clamped to off.
    #[must_use]
    pub fn apply(mut self, update: SettingsUpdate) -> Self {
        if let Some(enabled) = update.signups_enabled {
            self.signups_enabled = enabled;
        }
        if let Some(enabled) = update.ai_search_enabled {
            self.ai_search_enabled = enabled;
        }
        if let Some(enabled) = update.voice_search_enabled {
            self.voice_search_enabled = enabled;
        }
        // Dependency rule: voice search cannot outlive AI search.
        self.voice_search_enabled = self.voice_search_enabled && self.ai_search_enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let settings = StoreSettings::default();
        assert!(settings.signups_enabled);
        assert!(settings.ai_search_enabled);
        assert!(settings.voice_search_enabled);
    }

    #[test]
    fn test_disabling_ai_forces_voice_off() {
        let settings = StoreSettings::default().apply(SettingsUpdate {
            ai_search_enabled: Some(false),
            ..SettingsUpdate::default()
        });
        assert!(!settings.ai_search_enabled);
        assert!(!settings.voice_search_enabled);
    }

    #[test]
    fn test_voice_cannot_be_enabled_without_ai() {
        let mut settings = StoreSettings::default();
        settings.ai_search_enabled = false;
        settings.voice_search_enabled = false;

        let settings = settings.apply(SettingsUpdate {
            voice_search_enabled: Some(true),
            ..SettingsUpdate::default()
        });
        assert!(!settings.voice_search_enabled);
    }

    #[test]
    fn test_voice_enables_alongside_ai() {
        let mut settings = StoreSettings::default();
        settings.ai_search_enabled = false;
        settings.voice_search_enabled = false;

        let settings = settings.apply(SettingsUpdate {
            ai_search_enabled: Some(true),
            voice_search_enabled: Some(true),
            ..SettingsUpdate::default()
        });
        assert!(settings.ai_search_enabled);
        assert!(settings.voice_search_enabled);
    }

    #[test]
    fn test_untouched_fields_survive() {
        let settings = StoreSettings::default().apply(SettingsUpdate {
            signups_enabled: Some(false),
            ..SettingsUpdate::default()
        });
        assert!(!settings.signups_enabled);
        assert!(settings.ai_search_enabled);
        assert!(settings.voice_search_enabled);
    }
}
