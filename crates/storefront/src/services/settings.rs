//! Process-wide settings snapshot.
//!
//! A [`SettingsWatch`] holds the most recently loaded [`StoreSettings`]
//! and fans changes out over a `tokio::sync::watch` channel. Writers
//! publish after every successful save, so readers are push-updated
//! rather than polling; readers get the latest snapshot synchronously.

use std::sync::Arc;

use tokio::sync::watch;

use quickcart_core::StoreSettings;

/// Shared handle to the live settings snapshot.
#[derive(Clone)]
pub struct SettingsWatch {
    tx: Arc<watch::Sender<StoreSettings>>,
}

impl SettingsWatch {
    /// Create a watch seeded with an initial snapshot (typically loaded
    /// from the database at startup, or the defaults when that fails).
    #[must_use]
    pub fn new(initial: StoreSettings) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StoreSettings {
        *self.tx.borrow()
    }

    /// Publish a new snapshot to all subscribers.
    pub fn publish(&self, settings: StoreSettings) {
        // send_replace never fails; the sender keeps the value alive
        // even with zero subscribers.
        self.tx.send_replace(settings);
    }

    /// Subscribe for change notifications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSettings> {
        self.tx.subscribe()
    }
}

impl Default for SettingsWatch {
    fn default() -> Self {
        Self::new(StoreSettings::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickcart_core::SettingsUpdate;

    use super::*;

    #[test]
    fn test_snapshot_starts_at_initial() {
        let watch = SettingsWatch::default();
        assert!(watch.snapshot().ai_search_enabled);
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let watch = SettingsWatch::default();
        let mut rx = watch.subscribe();

        let next = watch.snapshot().apply(SettingsUpdate {
            ai_search_enabled: Some(false),
            ..SettingsUpdate::default()
        });
        watch.publish(next);

        rx.changed().await.unwrap();
        assert!(!rx.borrow().ai_search_enabled);
        assert!(!watch.snapshot().voice_search_enabled);
    }
}
