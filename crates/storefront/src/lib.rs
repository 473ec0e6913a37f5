//! QuickCart storefront library.
//!
//! The full HTTP surface of the store: catalog browsing, multi-category
//! search (text and voice), the session-backed cart, checkout with a
//! simulated payment step, order history, and the admin console. The
//! binary in `main.rs` wires configuration, the database pool, and the
//! live settings watch together and serves this crate's router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
