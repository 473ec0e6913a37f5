//! Home page content.

use serde::Serialize;

use quickcart_core::Product;

/// The three product rails shown on the storefront landing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub featured: Vec<Product>,
    pub hot_deals: Vec<Product>,
    pub latest: Vec<Product>,
}
