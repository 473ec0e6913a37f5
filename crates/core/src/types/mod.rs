//! Newtype wrappers for domain primitives.
//!
//! These types prevent mixing up raw strings and UUIDs from different
//! entity types at compile time.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{CategoryId, OrderId, ProductId, UserId};
