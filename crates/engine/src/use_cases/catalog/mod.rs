//! Catalog ingestion.

mod refresh_catalog;

pub use refresh_catalog::{RefreshCatalog, RefreshError};
