//! The cart state container.
//!
//! A [`Cart`] is an insertion-ordered collection of [`LineItem`]s with at
//! most one line per product. All mutation goes through the operations
//! below; callers never touch the line items directly. The container is
//! pure state - persistence is the owner's job (the storefront keeps the
//! serialized cart in the session under a fixed key).
//!
//! # Invariants
//!
//! - At most one line item per product ID.
//! - Every line item has quantity >= 1; decrementing a quantity of 1
//!   removes the line instead of storing a zero.
//! - Insertion order is preserved for display stability.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// One product entry in a cart with its quantity.
///
/// Display attributes are copied from the product at add time so the cart
/// renders even if the catalog entry changes or disappears later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart state container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add a product to the cart.
    ///
    /// If a line for this product already exists its quantity is
    /// incremented by one; otherwise a new line with quantity 1 is
    /// appended, copying the product's display attributes.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(LineItem {
                id: product.id,
                name: product.name.clone(),
                category: product.category.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity: 1,
            });
        }
    }

    /// Increment the quantity of an existing line by one.
    ///
    /// No-op if the product is not in the cart.
    pub fn increase(&mut self, id: ProductId) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity += 1;
        }
    }

    /// Decrement the quantity of an existing line by one.
    ///
    /// A line at quantity 1 is removed entirely rather than kept at zero.
    /// No-op if the product is not in the cart.
    pub fn decrease(&mut self, id: ProductId) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.quantity > 1 => item.quantity -= 1,
            Some(_) => self.remove(id),
            None => {}
        }
    }

    /// Remove a line from the cart, if present.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(name: &str, price: &str) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            category: "dairy".to_owned(),
            price: price.parse().unwrap(),
            image_url: format!("https://img.example/{name}.jpg"),
            created_at: Utc::now(),
            is_hot_deal: false,
            is_featured: false,
        }
    }

    #[test]
    fn test_repeated_adds_accumulate_quantity() {
        let milk = product("milk", "52.00");
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(&milk);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_copies_display_attributes() {
        let milk = product("milk", "52.00");
        let mut cart = Cart::new();
        cart.add(&milk);

        let item = &cart.items()[0];
        assert_eq!(item.name, "milk");
        assert_eq!(item.category, "dairy");
        assert_eq!(item.image_url, milk.image_url);
        assert_eq!(item.price, milk.price);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let a = product("a", "1.00");
        let b = product("b", "2.00");
        let c = product("c", "3.00");
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&b);
        cart.add(&c);
        cart.add(&a); // bump, must not reorder

        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_increase_absent_is_noop() {
        let mut cart = Cart::new();
        cart.increase(ProductId::generate());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_removes_at_quantity_one() {
        let milk = product("milk", "52.00");
        let mut cart = Cart::new();
        cart.add(&milk);
        cart.add(&milk);

        cart.decrease(milk.id);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.decrease(milk.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_absent_is_noop() {
        let milk = product("milk", "52.00");
        let mut cart = Cart::new();
        cart.add(&milk);
        cart.decrease(ProductId::generate());
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove() {
        let a = product("a", "1.00");
        let b = product("b", "2.00");
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&b);

        cart.remove(a.id);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, "b");

        // Removing again is a no-op
        cart.remove(a.id);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let a = product("a", "1.00");
        let mut cart = Cart::new();
        cart.add(&a);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_total() {
        // {a: 10.00 x 2, b: 5.00 x 1} => 25.00
        let a = product("a", "10.00");
        let b = product("b", "5.00");
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        assert_eq!(cart.total(), "25.00".parse().unwrap());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = product("a", "10.00");
        let b = product("b", "5.00");
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        let json = serde_json::to_string(&cart).unwrap();
        let rehydrated: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(rehydrated, cart);
    }
}
