//! Search handlers, text and voice.
//!
//! Text search runs the raw query through the assistant when AI search
//! is enabled (falling back to plain term matching when the assistant
//! is simply not configured), then fans out one lookup per category
//! term. Voice search upgrades to a WebSocket that relays audio to the
//! transcription service; both toggles come from the live settings
//! snapshot.

use axum::{
    Json,
    extract::{Query, State, WebSocketUpgrade},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::search::{SearchResponse, build_response, parse_terms, search_categories};
use crate::services::assistant::AssistantError;
use crate::services::voice;
use crate::state::AppState;

/// Query string for text search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /search?q= - multi-category product search.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let raw = params.q.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("empty search query".to_owned()));
    }

    let (query, original_query) = if state.settings().snapshot().ai_search_enabled {
        match state.assistant().normalize(raw).await {
            Ok(normalized) => (normalized, Some(raw.to_owned())),
            // A deployment without an assistant endpoint degrades to
            // plain matching instead of failing every search.
            Err(AssistantError::NotConfigured) => (raw.to_owned(), None),
            Err(e) => return Err(e.into()),
        }
    } else {
        (raw.to_owned(), None)
    };

    let terms = parse_terms(&query);
    if terms.is_empty() {
        return Ok(Json(build_response(query, original_query, Vec::new())));
    }

    let groups = search_categories(state.pool(), terms).await;
    Ok(Json(build_response(query, original_query, groups)))
}

/// GET /search/voice - WebSocket relay to the transcription service.
///
/// Rejected up front when voice search is disabled in settings or no
/// transcription endpoint is configured.
#[instrument(skip_all)]
pub async fn voice(State(state): State<AppState>, ws: WebSocketUpgrade) -> Result<Response> {
    if !state.settings().snapshot().voice_search_enabled {
        return Err(AppError::Forbidden("voice search is disabled".to_owned()));
    }
    let asr_url = state
        .config()
        .asr_url
        .clone()
        .ok_or_else(|| AppError::Internal("transcription service not configured".to_owned()))?;

    Ok(ws.on_upgrade(move |socket| async move {
        if let Err(e) = voice::relay(socket, &asr_url).await {
            tracing::warn!(error = %e, "voice relay ended with error");
        }
    }))
}
