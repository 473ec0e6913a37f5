//! Authentication route handlers.
//!
//! Registration is gated on the live `signups_enabled` setting; login
//! is always available. On success the user snapshot is written to the
//! session and mirrored into the Sentry scope.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Credentials for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - create an account and sign in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CredentialsForm>,
) -> Result<(StatusCode, Json<CurrentUser>)> {
    if !state.settings().snapshot().signups_enabled {
        return Err(AppError::Forbidden(
            "new signups are currently disabled".to_owned(),
        ));
    }

    let user = AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, "user registered");
    Ok((StatusCode::CREATED, Json(current)))
}

/// POST /auth/login - sign in.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CredentialsForm>,
) -> Result<Json<CurrentUser>> {
    let user = AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await?;

    // Rotate the session ID on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle failed: {e}")))?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, "user logged in");
    Ok(Json(current))
}

/// POST /auth/logout - sign out, keeping the cart.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - the signed-in identity, if any.
#[instrument(skip_all)]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<Option<CurrentUser>> {
    Json(user)
}
