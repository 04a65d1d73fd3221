//! Port traits for the engine's boundaries.
//!
//! These are the only abstractions in the engine. The transport collaborator
//! receives data-only side-effect requests through [`Notifier`] and renders
//! them however it likes; the engine never formats messages or talks to a
//! chat service. The ingestion collaborator feeds raw inventory through
//! [`InventorySource`]; the clock is a port so tests can pin time.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use clockwork_domain::Request;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
    #[error("Destination unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Inventory fetch failed: {0}")]
    Fetch(String),
    #[error("Malformed inventory record: {0}")]
    Malformed(String),
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// One raw inventory record from the ingestion collaborator. Counts default
/// to zero; `is_spell` of `None` asks the engine to classify by name.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub name: String,
    pub raw_count: u32,
    pub enchanted_count: u32,
    pub legendary_count: u32,
    pub source: Option<String>,
    pub item_id: Option<u64>,
    pub is_spell: Option<bool>,
}

impl SourceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_count: 0,
            enchanted_count: 0,
            legendary_count: 0,
            source: None,
            item_id: None,
            is_spell: None,
        }
    }

    pub fn with_counts(mut self, raw: u32, enchanted: u32, legendary: u32) -> Self {
        self.raw_count = raw;
        self.enchanted_count = enchanted;
        self.legendary_count = legendary;
        self
    }
}

/// Everything a catalog rebuild needs: the records plus an optional
/// class -> item-name grouping used to populate the class indices.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub records: Vec<SourceRecord>,
    pub class_items: HashMap<String, Vec<String>>,
}

// =============================================================================
// Ports
// =============================================================================

/// Outbound side-effect requests toward the chat transport.
///
/// Every method hands over a snapshot of request state; the transport owns
/// rendering and delivery. Failures are reported back but the engine treats
/// delivery as best-effort: a lost message never rolls back a transition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce a freshly submitted request and open a discussion context
    /// keyed by its id.
    async fn announce_request(&self, request: &Request) -> Result<(), NotifyError>;

    /// Post the terminal resolution into the request's discussion context.
    async fn publish_resolution(&self, request: &Request) -> Result<(), NotifyError>;

    /// Tell the requester directly how their request ended.
    async fn notify_requester(&self, request: &Request) -> Result<(), NotifyError>;
}

/// Inbound raw inventory from the ingestion collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, SourceError>;
}

/// Wall-clock time, injectable for tests.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
