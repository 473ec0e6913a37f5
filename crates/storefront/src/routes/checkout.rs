//! Checkout handler.
//!
//! Payment is simulated: the handler waits the configured processing
//! delay, then records the order with its item snapshot and empties
//! the cart. Orders always start in the `placed` status.

use axum::{Json, extract::State};
use tracing::instrument;

use quickcart_core::{Order, OrderItem};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// POST /checkout - turn the session cart into a placed order.
///
/// Requires a signed-in user; an empty cart is rejected before the
/// payment delay.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn place_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: tower_sessions::Session,
) -> Result<Json<Order>> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    // Simulated payment processing.
    tokio::time::sleep(state.config().mock_payment_delay).await;

    let items = OrderItem::from_cart(&cart);
    let total = cart.total();
    let order = OrderRepository::new(state.pool())
        .place(user.id, &items, total)
        .await?;

    cart.clear();
    save_cart(&session, &cart).await;

    tracing::info!(order_id = %order.id, %total, "order placed");
    Ok(Json(order))
}
