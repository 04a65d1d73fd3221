//! Catalog refresh use case.

use std::collections::HashMap;
use std::sync::Arc;

use clockwork_domain::{normalize, Catalog, ItemRecord};

use crate::infrastructure::ports::{InventorySource, SourceError};
use crate::infrastructure::settings::EngineConfig;
use crate::stores::CatalogStore;

/// Errors that can occur during a catalog refresh.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Rebuild the catalog from the inventory source and swap it in.
///
/// The old snapshot stays live for in-flight readers; nothing observes a
/// half-built catalog. Records the source does not classify are marked as
/// spells by name heuristics from the class configuration.
pub struct RefreshCatalog {
    source: Arc<dyn InventorySource>,
    catalog: Arc<CatalogStore>,
    config: EngineConfig,
}

impl RefreshCatalog {
    pub fn new(
        source: Arc<dyn InventorySource>,
        catalog: Arc<CatalogStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            source,
            catalog,
            config,
        }
    }

    /// Fetch, rebuild, swap. Returns the number of catalog entries.
    pub async fn execute(&self) -> Result<usize, RefreshError> {
        let snapshot = self.source.fetch_inventory().await?;

        // Invert the class grouping so each record can be tagged during
        // the single pass below.
        let mut class_by_key: HashMap<String, String> = HashMap::new();
        for (class_key, names) in &snapshot.class_items {
            for name in names {
                class_by_key.insert(normalize(name), class_key.clone());
            }
        }

        let mut builder = Catalog::builder();
        for record in snapshot.records {
            let is_spell = record
                .is_spell
                .unwrap_or_else(|| self.config.classes.looks_like_spell(&record.name));

            let mut item = ItemRecord::new(record.name).with_counts(
                record.raw_count,
                record.enchanted_count,
                record.legendary_count,
            );
            item.is_spell = is_spell;
            item.item_id = record.item_id;
            item.source = record.source;
            item.class_key = class_by_key.get(&normalize(&item.name)).cloned();

            builder.push(item);
        }
        let catalog = builder.build();
        let count = catalog.len();

        self.catalog.replace(catalog).await;
        tracing::info!(items = count, "Catalog rebuilt");
        Ok(count)
    }
}
