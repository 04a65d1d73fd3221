//! Clockwork Banker engine library.
//!
//! Orchestration around the pure domain: concurrent stores, use cases, and
//! the ports through which the external collaborators (chat transport,
//! inventory ingestion) reach the engine.
//!
//! ## Structure
//!
//! - `stores/` - Catalog snapshot holder, per-user carts, active requests
//! - `use_cases/` - Search, cart, request lifecycle, catalog refresh
//! - `infrastructure/` - Port traits, clock, engine configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
