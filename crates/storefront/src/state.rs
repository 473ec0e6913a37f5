//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::HomeContent;
use crate::services::assistant::SearchAssistantClient;
use crate::services::settings::SettingsWatch;

/// How long assembled home content may be served before re-querying.
const HOME_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    assistant: SearchAssistantClient,
    settings: SettingsWatch,
    home_cache: moka::future::Cache<(), Arc<HomeContent>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool, settings: SettingsWatch) -> Self {
        let assistant = SearchAssistantClient::new(config.assistant_url.clone());
        let home_cache = moka::future::Cache::builder()
            .max_capacity(1)
            .time_to_live(HOME_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                assistant,
                settings,
                home_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the search assistant client.
    #[must_use]
    pub fn assistant(&self) -> &SearchAssistantClient {
        &self.inner.assistant
    }

    /// Get a handle to the live store settings.
    #[must_use]
    pub fn settings(&self) -> &SettingsWatch {
        &self.inner.settings
    }

    /// Get the home content cache.
    #[must_use]
    pub fn home_cache(&self) -> &moka::future::Cache<(), Arc<HomeContent>> {
        &self.inner.home_cache
    }
}
