//! Concurrent stores owned by one engine instance.
//!
//! No process-wide singletons: every store is an injectable object, so
//! tests can run isolated engines side by side.

mod carts;
mod catalog;
mod requests;

pub use carts::CartStore;
pub use catalog::CatalogStore;
pub use requests::RequestStore;
