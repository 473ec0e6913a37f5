//! Product and category records.
//!
//! Field names serialize in camelCase to match the store's wire format
//! (`imageUrl`, `isHotDeal`, ...).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Normalized lowercase category name, the exact-match search key.
    pub category: String,
    pub price: Decimal,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub is_hot_deal: bool,
    pub is_featured: bool,
}

/// A product category.
///
/// Category names are stored lowercased and act as the join key between
/// products and search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
