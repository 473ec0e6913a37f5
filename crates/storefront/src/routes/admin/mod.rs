//! Admin console handlers.
//!
//! Every handler here takes the [`RequireAdmin`](crate::middleware::RequireAdmin)
//! extractor; there is no separate admin binary, the console is a
//! guarded slice of the storefront.

pub mod categories;
pub mod products;
pub mod settings;
