//! Catalog browsing handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use quickcart_core::{Category, Product, ProductId};

use crate::db::categories::CategoryRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Optional category filter for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// GET /products - the catalog, optionally filtered by category.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let products = match params.category.as_deref() {
        Some(category) => repo.by_category(category).await?,
        None => repo.list().await?,
    };
    Ok(Json(products))
}

/// GET /products/{id} - a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// GET /categories - all categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}
