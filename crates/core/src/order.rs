//! Placed orders and their line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{OrderId, ProductId, UserId};

/// Lifecycle status of an order.
///
/// Payment is mocked, so every order lands directly in `Placed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Placed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed => write!(f, "placed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(Self::Placed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A snapshot of one cart line at order time.
///
/// Orders keep their own copy of name and price so history stays stable
/// when the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Snapshot the lines of a cart into order items.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Vec<Self> {
        cart.items()
            .iter()
            .map(|line| Self {
                id: line.id,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::Product;

    #[test]
    fn test_order_items_snapshot_cart() {
        let milk = Product {
            id: ProductId::generate(),
            name: "milk".to_owned(),
            category: "dairy".to_owned(),
            price: "52.00".parse().unwrap(),
            image_url: "https://img.example/milk.jpg".to_owned(),
            created_at: Utc::now(),
            is_hot_deal: false,
            is_featured: false,
        };
        let mut cart = Cart::new();
        cart.add(&milk);
        cart.add(&milk);

        let items = OrderItem::from_cart(&cart);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "milk");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, milk.price);
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!("placed".parse::<OrderStatus>().unwrap(), OrderStatus::Placed);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
