//! Admin product management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use quickcart_core::{Product, ProductId};

use crate::db::products::{ProductInput, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Product fields accepted from the admin console.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub image_url: String,
    #[serde(default)]
    pub is_hot_deal: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Flag value for the hot-deal and featured toggles.
#[derive(Debug, Deserialize)]
pub struct FlagForm {
    pub value: bool,
}

impl ProductForm {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("product name is required".to_owned()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::BadRequest("category is required".to_owned()));
        }
        if self.price.is_sign_negative() {
            return Err(AppError::BadRequest("price cannot be negative".to_owned()));
        }
        Ok(())
    }

    fn into_input(self) -> ProductInput {
        ProductInput {
            name: self.name.trim().to_owned(),
            category: self.category,
            price: self.price,
            image_url: self.image_url,
            is_hot_deal: self.is_hot_deal,
            is_featured: self.is_featured,
        }
    }
}

/// POST /admin/products - add a product to the catalog.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    form.validate()?;
    let product = ProductRepository::new(state.pool())
        .create(&form.into_input())
        .await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id} - replace a product's fields.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>> {
    form.validate()?;
    let product = ProductRepository::new(state.pool())
        .update(id, &form.into_input())
        .await?;
    Ok(Json(product))
}

/// PUT /admin/products/{id}/hot-deal - toggle the hot-deal flag.
#[instrument(skip(state))]
pub async fn set_hot_deal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(form): Json<FlagForm>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .set_hot_deal(id, form.value)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /admin/products/{id}/featured - toggle the featured flag.
#[instrument(skip(state))]
pub async fn set_featured(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(form): Json<FlagForm>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .set_featured(id, form.value)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /admin/products/{id} - remove a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, category: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_owned(),
            category: category.to_owned(),
            price: price.parse().unwrap(),
            image_url: "https://img.example/p.png".to_owned(),
            is_hot_deal: false,
            is_featured: false,
        }
    }

    #[test]
    fn test_form_validation() {
        assert!(form("Milk", "dairy", "3.50").validate().is_ok());
        assert!(form("", "dairy", "3.50").validate().is_err());
        assert!(form("Milk", "  ", "3.50").validate().is_err());
        assert!(form("Milk", "dairy", "-1.00").validate().is_err());
    }
}
