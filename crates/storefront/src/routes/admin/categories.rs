//! Admin category management.
//!
//! Renames relink every product in the category and deletes cascade to
//! the products; both report how many products were touched so the
//! console can confirm the blast radius.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quickcart_core::{Category, CategoryId};

use crate::db::categories::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A category name, for create and rename.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

/// How many products a rename or delete touched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResponse {
    pub products_affected: u64,
}

/// POST /admin/categories - add a category.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<CategoryForm>,
) -> Result<(StatusCode, Json<Category>)> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("category name is required".to_owned()));
    }
    let category = CategoryRepository::new(state.pool())
        .create(&form.name)
        .await?;
    tracing::info!(category_id = %category.id, name = %category.name, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /admin/categories/{id} - rename, relinking its products.
#[instrument(skip(state, form))]
pub async fn rename(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<CategoryId>,
    Json(form): Json<CategoryForm>,
) -> Result<Json<CascadeResponse>> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("category name is required".to_owned()));
    }
    let products_affected = CategoryRepository::new(state.pool())
        .rename(id, &form.name)
        .await?;
    tracing::info!(category_id = %id, products_affected, "category renamed");
    Ok(Json(CascadeResponse { products_affected }))
}

/// DELETE /admin/categories/{id} - delete along with its products.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<CategoryId>,
) -> Result<Json<CascadeResponse>> {
    let products_affected = CategoryRepository::new(state.pool()).delete(id).await?;
    tracing::info!(category_id = %id, products_affected, "category deleted");
    Ok(Json(CascadeResponse { products_affected }))
}
