//! QuickCart Core - Shared types and the cart state container.
//!
//! This crate provides common types used across the QuickCart components:
//! - `storefront` - Customer-facing store API and admin routes
//! - `cli` - Command-line tools for migrations, seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no database
//! access, no HTTP clients. The [`cart::Cart`] container owns all cart
//! mutation rules; the storefront is responsible for persisting it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated emails
//! - [`cart`] - The cart state container and its mutation operations
//! - [`catalog`] - Product and category records
//! - [`order`] - Placed orders and their line items
//! - [`settings`] - Store feature toggles and their dependency rule

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod settings;
pub mod types;

pub use cart::{Cart, LineItem};
pub use catalog::{Category, Product};
pub use order::{Order, OrderItem, OrderStatus};
pub use settings::{SettingsUpdate, StoreSettings};
pub use types::*;
