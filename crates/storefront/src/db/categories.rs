//! Category repository.
//!
//! Categories are the search keys of the store, so renames and deletes
//! must keep `products.category` in step. Both run in a single
//! transaction the way the source store batches the writes.

use sqlx::PgPool;
use uuid::Uuid;

use quickcart_core::{Category, CategoryId};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Create a category. Names are stored lowercased and trimmed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let normalized = name.trim().to_lowercase();

        let row: CategoryRow =
            sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
                .bind(&normalized)
                .fetch_one(self.pool)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(ref db_err) = e
                        && db_err.is_unique_violation()
                    {
                        return RepositoryError::Conflict("category already exists".to_owned());
                    }
                    RepositoryError::Database(e)
                })?;

        Ok(row.into())
    }

    /// Rename a category and relink every product in it, atomically.
    ///
    /// Returns the number of products that were relinked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    pub async fn rename(&self, id: CategoryId, new_name: &str) -> Result<u64, RepositoryError> {
        let normalized = new_name.trim().to_lowercase();
        let mut tx = self.pool.begin().await?;

        let old: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let old = old.ok_or(RepositoryError::NotFound)?;

        if old.name == normalized {
            return Ok(0);
        }

        sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(&normalized)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("category already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        let relinked = sqlx::query("UPDATE products SET category = $2 WHERE category = $1")
            .bind(&old.name)
            .bind(&normalized)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(relinked)
    }

    /// Delete a category and every product in it, atomically.
    ///
    /// Returns the number of products that were deleted alongside.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    pub async fn delete(&self, id: CategoryId) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let category: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let category = category.ok_or(RepositoryError::NotFound)?;

        let removed = sqlx::query("DELETE FROM products WHERE category = $1")
            .bind(&category.name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(removed)
    }
}
