//! Admin store settings.
//!
//! Updates are read-modify-write against the stored snapshot, then
//! published to the live watch so storefront handlers pick the change
//! up immediately. Disabling AI search forces voice search off.

use axum::{Json, extract::State};
use tracing::instrument;

use quickcart_core::{SettingsUpdate, StoreSettings};

use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// GET /admin/settings - the current store settings.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<StoreSettings> {
    Json(state.settings().snapshot())
}

/// PATCH /admin/settings - apply a partial update.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<StoreSettings>> {
    let repo = SettingsRepository::new(state.pool());

    let next = repo.load().await?.apply(update);
    repo.save(next).await?;
    state.settings().publish(next);

    tracing::info!(?next, "store settings updated");
    Ok(Json(next))
}
