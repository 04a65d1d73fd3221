//! Item search use case.
//!
//! Two shapes of query share one entry point: spell-class listings
//! ("spell wizard", "show mage spells") and plain substring search over
//! catalog keys. The transport renders the structured outcome.

use std::sync::Arc;

use clockwork_domain::{parse_spell_query, resolve_spells, ItemRecord};

use crate::infrastructure::settings::EngineConfig;
use crate::stores::CatalogStore;

/// Structured search results.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Spell listing for one class, sorted by display name.
    Spells {
        class: String,
        items: Vec<ItemRecord>,
    },
    /// Plain substring matches, catalog insertion order, capped.
    Items(Vec<ItemRecord>),
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Spells { items, .. } | Self::Items(items) => items.is_empty(),
        }
    }
}

/// Search use case.
pub struct SearchItems {
    catalog: Arc<CatalogStore>,
    config: EngineConfig,
}

impl SearchItems {
    pub fn new(catalog: Arc<CatalogStore>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub async fn execute(&self, query: &str) -> SearchOutcome {
        let catalog = self.catalog.snapshot().await;

        if let Some(class_token) = parse_spell_query(query) {
            let items = resolve_spells(
                &catalog,
                &self.config.classes,
                &class_token,
                self.config.spell_scan_cap,
            );
            let class = self.config.classes.canonical_class(&class_token);
            tracing::debug!(class = %class, results = items.len(), "Spell class search");
            return SearchOutcome::Spells { class, items };
        }

        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return SearchOutcome::Items(Vec::new());
        }

        let mut items = Vec::new();
        for (key, record) in catalog.iter() {
            if key.contains(&term) {
                items.push(record.clone());
                if items.len() >= self.config.search_result_cap {
                    break;
                }
            }
        }
        tracing::debug!(query = %term, results = items.len(), "Item search");
        SearchOutcome::Items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockwork_domain::{Catalog, ItemRecord};

    async fn store_with(records: Vec<ItemRecord>) -> Arc<CatalogStore> {
        let mut builder = Catalog::builder();
        for record in records {
            builder.push(record);
        }
        let store = Arc::new(CatalogStore::new());
        store.replace(builder.build()).await;
        store
    }

    #[tokio::test]
    async fn substring_search_respects_cap() {
        let records = (0..15)
            .map(|i| ItemRecord::new(format!("Sword of Flame {:02}", i)).with_counts(1, 0, 0))
            .collect();
        let search = SearchItems::new(store_with(records).await, EngineConfig::default());

        match search.execute("sword").await {
            SearchOutcome::Items(items) => assert_eq!(items.len(), 10),
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn spell_query_lists_class_spells_alphabetically() {
        let records = vec![
            ItemRecord::new("C").as_spell().with_class("wizard").with_counts(1, 0, 0),
            ItemRecord::new("A").as_spell().with_class("wizard").with_counts(1, 0, 0),
            ItemRecord::new("B").as_spell().with_class("wizard").with_counts(1, 0, 0),
        ];
        let search = SearchItems::new(store_with(records).await, EngineConfig::default());

        match search.execute("spell wizard").await {
            SearchOutcome::Spells { class, items } => {
                assert_eq!(class, "wizard");
                let names: Vec<_> = items.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["A", "B", "C"]);
            }
            other => panic!("expected spells, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_query_returns_nothing() {
        let search = SearchItems::new(store_with(Vec::new()).await, EngineConfig::default());
        assert!(search.execute("   ").await.is_empty());
    }
}
