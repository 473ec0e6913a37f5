//! Sample catalog seeding.
//!
//! Loads a small grocery catalog for local development. Safe to run
//! repeatedly; categories that already exist are skipped and products
//! are inserted fresh each time.

use rust_decimal::Decimal;

use quickcart_storefront::db::products::ProductInput;
use quickcart_storefront::db::{CategoryRepository, ProductRepository, RepositoryError};

use super::{CliError, connect};

/// name, category, price, hot deal, featured
const SAMPLE_PRODUCTS: &[(&str, &str, &str, bool, bool)] = &[
    ("Whole Milk 1L", "dairy", "1.99", false, true),
    ("Salted Butter 250g", "dairy", "2.49", true, false),
    ("Greek Yogurt 500g", "dairy", "3.29", false, false),
    ("Sourdough Loaf", "bakery", "4.50", false, true),
    ("Croissant 4-pack", "bakery", "3.99", true, false),
    ("Bananas 1kg", "fruit", "1.29", false, false),
    ("Gala Apples 1kg", "fruit", "2.79", false, true),
    ("Strawberries 400g", "fruit", "3.49", true, false),
    ("Dish Soap 500ml", "household", "2.19", false, false),
    ("Paper Towels 2-pack", "household", "3.89", false, false),
];

/// Insert the sample catalog.
///
/// # Errors
///
/// Returns `CliError` if the connection or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let mut category_names: Vec<&str> = SAMPLE_PRODUCTS.iter().map(|p| p.1).collect();
    category_names.sort_unstable();
    category_names.dedup();

    for name in category_names {
        match categories.create(name).await {
            Ok(_) => tracing::info!(category = name, "category created"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!(category = name, "category already exists");
            }
            Err(e) => return Err(e.into()),
        }
    }

    for &(name, category, price, is_hot_deal, is_featured) in SAMPLE_PRODUCTS {
        let price: Decimal = price
            .parse()
            .map_err(|e| CliError::InvalidInput(format!("bad sample price {price}: {e}")))?;
        products
            .create(&ProductInput {
                name: name.to_owned(),
                category: category.to_owned(),
                price,
                image_url: format!(
                    "https://placehold.co/400x400?text={}",
                    name.replace(' ', "+")
                ),
                is_hot_deal,
                is_featured,
            })
            .await?;
        tracing::info!(product = name, "product created");
    }

    tracing::info!("seed complete");
    Ok(())
}
