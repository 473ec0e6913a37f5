//! QuickCart Storefront - grocery storefront API.
//!
//! This binary serves the public storefront and the admin console on one
//! port.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - `PostgreSQL` for the catalog, users, orders, and settings documents
//! - tower-sessions (Postgres-backed) for login state and the cart
//! - Remote assistant function for AI search normalization
//! - WebSocket relay to the speech transcription service for voice search

#![cfg_attr(not(test), forbid(unsafe_code))]

use quickcart_storefront::config::StorefrontConfig;
use quickcart_storefront::db;
use quickcart_storefront::middleware::create_session_layer;
use quickcart_storefront::middleware::session::create_session_store;
use quickcart_storefront::routes;
use quickcart_storefront::services::settings::SettingsWatch;
use quickcart_storefront::state::AppState;

use axum::http::HeaderValue;
use sentry::integrations::tracing as sentry_tracing;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickcart_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::migrator()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // tower-sessions manages its own table
    create_session_store(&pool)
        .migrate()
        .await
        .expect("Failed to migrate session store");

    // Seed the live settings from storage; a failed load falls back to
    // defaults rather than refusing to start.
    let initial_settings = match db::settings::SettingsRepository::new(&pool).load().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            quickcart_core::StoreSettings::default()
        }
    };
    let settings = SettingsWatch::new(initial_settings);

    let state = AppState::new(config.clone(), pool, settings);

    let session_layer = create_session_layer(state.pool(), state.config());

    // The browser frontend sends the session cookie cross-origin, so the
    // allowed origin must be explicit (wildcard + credentials is rejected).
    let cors_origin: HeaderValue = state
        .config()
        .base_url
        .parse()
        .expect("BASE_URL is not a valid origin");
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let app = routes::router()
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
