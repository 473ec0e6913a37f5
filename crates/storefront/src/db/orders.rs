//! Order repository.
//!
//! Order items are stored as a JSONB snapshot of the cart lines, so
//! history stays readable even after the catalog changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use quickcart_core::{Order, OrderId, OrderItem, OrderStatus, UserId};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    items: serde_json::Value,
    total_price: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order items: {e}")))?;
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order status: {e}")))?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            items,
            total_price: row.total_price,
            status,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write a placed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, and
    /// `RepositoryError::DataCorruption` if the items fail to serialize.
    pub async fn place(
        &self,
        user_id: UserId,
        items: &[OrderItem],
        total_price: Decimal,
    ) -> Result<Order, RepositoryError> {
        let items_json = serde_json::to_value(items)
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable items: {e}")))?;

        let row: OrderRow = sqlx::query_as(
            "INSERT INTO orders (user_id, items, total_price, status)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, items, total_price, status, created_at",
        )
        .bind(user_id.as_uuid())
        .bind(items_json)
        .bind(total_price)
        .bind(OrderStatus::Placed.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// The given user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, items, total_price, status, created_at
             FROM orders WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Look up one of the user's orders by ID.
    ///
    /// Scoped to the owner so one user cannot read another's confirmation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, items, total_price, status, created_at
             FROM orders WHERE id = $1 AND user_id = $2",
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
