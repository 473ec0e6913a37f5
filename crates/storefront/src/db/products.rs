//! Product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use quickcart_core::{Product, ProductId};

use super::RepositoryError;

/// How many products each home-page section shows.
pub const HOME_SECTION_LIMIT: i64 = 10;

/// A new or updated product, as accepted from the admin surface.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub image_url: String,
    pub is_hot_deal: bool,
    pub is_featured: bool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    price: Decimal,
    image_url: String,
    created_at: DateTime<Utc>,
    is_hot_deal: bool,
    is_featured: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            category: row.category,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
            is_hot_deal: row.is_hot_deal,
            is_featured: row.is_featured,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, category, price, image_url, created_at, is_hot_deal, is_featured";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// List the full catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Products whose category exactly matches the given term.
    ///
    /// The term is expected to be already normalized (lowercased, trimmed).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 ORDER BY created_at DESC"
        ))
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured(&self) -> Result<Vec<Product>, RepositoryError> {
        self.flagged("is_featured").await
    }

    /// Hot-deal products for the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn hot_deals(&self) -> Result<Vec<Product>, RepositoryError> {
        self.flagged("is_hot_deal").await
    }

    async fn flagged(&self, flag_column: &str) -> Result<Vec<Product>, RepositoryError> {
        // flag_column comes from the two callers above, never user input
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE {flag_column} LIMIT $1"
        ))
        .bind(HOME_SECTION_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// The most recently added products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(HOME_SECTION_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products (name, category, price, image_url, is_hot_deal, is_featured)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.category.trim().to_lowercase())
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.is_hot_deal)
        .bind(input.is_featured)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products
             SET name = $2, category = $3, price = $4, image_url = $5,
                 is_hot_deal = $6, is_featured = $7
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(&input.name)
        .bind(input.category.trim().to_lowercase())
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.is_hot_deal)
        .bind(input.is_featured)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Toggle the hot-deal flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn set_hot_deal(&self, id: ProductId, value: bool) -> Result<(), RepositoryError> {
        self.set_flag(id, "is_hot_deal", value).await
    }

    /// Toggle the featured flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn set_featured(&self, id: ProductId, value: bool) -> Result<(), RepositoryError> {
        self.set_flag(id, "is_featured", value).await
    }

    async fn set_flag(
        &self,
        id: ProductId,
        flag_column: &str,
        value: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(&format!(
            "UPDATE products SET {flag_column} = $2 WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .bind(value)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
