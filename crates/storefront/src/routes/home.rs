//! Home page content handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::HomeContent;
use crate::state::AppState;

/// GET / - the three home-page rails (featured, hot deals, latest).
///
/// Assembled content is cached briefly; concurrent requests share one
/// set of queries via the cache's coalescing `try_get_with`.
#[instrument(skip_all)]
pub async fn content(State(state): State<AppState>) -> Result<Json<Arc<HomeContent>>> {
    let content = state
        .home_cache()
        .try_get_with((), load_content(&state))
        .await
        .map_err(|e: Arc<AppError>| {
            AppError::Internal(format!("failed to load home content: {e}"))
        })?;

    Ok(Json(content))
}

async fn load_content(state: &AppState) -> std::result::Result<Arc<HomeContent>, AppError> {
    let repo = ProductRepository::new(state.pool());
    let (featured, hot_deals, latest) =
        tokio::join!(repo.featured(), repo.hot_deals(), repo.latest());

    Ok(Arc::new(HomeContent {
        featured: featured?,
        hot_deals: hot_deals?,
        latest: latest?,
    }))
}
