//! Cart route handlers.
//!
//! The cart lives in the session under a fixed key and survives
//! sign-in, sign-out, and restarts for as long as the session cookie
//! does. Saves are best-effort: a failed write keeps the in-memory
//! cart for this response and logs the failure.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use quickcart_core::{Cart, ProductId};
use rust_decimal::Decimal;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart snapshot returned by every mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    items: Cart,
    total: Decimal,
    item_count: u32,
}

impl From<Cart> for CartResponse {
    fn from(items: Cart) -> Self {
        let total = items.total();
        let item_count = items.item_count();
        Self {
            items,
            total,
            item_count,
        }
    }
}

/// Read the cart from the session, treating any failure as empty.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read cart from session, starting empty");
            Cart::new()
        }
    }
}

/// Write the cart back to the session, best-effort.
pub async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(session_keys::CART, cart).await {
        tracing::warn!(error = %e, "failed to persist cart to session");
    }
}

/// GET /cart - the current cart.
#[instrument(skip_all)]
pub async fn show(session: Session) -> Json<CartResponse> {
    Json(load_cart(&session).await.into())
}

/// POST /cart/items/{id} - add one unit of a product.
///
/// Adding the same product again bumps its quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartResponse>> {
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let mut cart = load_cart(&session).await;
    cart.add(&product);
    save_cart(&session, &cart).await;

    Ok(Json(cart.into()))
}

/// POST /cart/items/{id}/increase - bump quantity by one.
#[instrument(skip(session))]
pub async fn increase(session: Session, Path(product_id): Path<ProductId>) -> Json<CartResponse> {
    let mut cart = load_cart(&session).await;
    cart.increase(product_id);
    save_cart(&session, &cart).await;
    Json(cart.into())
}

/// POST /cart/items/{id}/decrease - drop quantity by one.
///
/// Decreasing a line at quantity one removes it entirely.
#[instrument(skip(session))]
pub async fn decrease(session: Session, Path(product_id): Path<ProductId>) -> Json<CartResponse> {
    let mut cart = load_cart(&session).await;
    cart.decrease(product_id);
    save_cart(&session, &cart).await;
    Json(cart.into())
}

/// DELETE /cart/items/{id} - remove a line regardless of quantity.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(product_id): Path<ProductId>) -> Json<CartResponse> {
    let mut cart = load_cart(&session).await;
    cart.remove(product_id);
    save_cart(&session, &cart).await;
    Json(cart.into())
}

/// DELETE /cart - empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<CartResponse> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;
    Json(cart.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_response_shape() {
        let response = CartResponse::from(Cart::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["itemCount"], 0);
        assert_eq!(json["total"], serde_json::json!("0"));
    }
}
