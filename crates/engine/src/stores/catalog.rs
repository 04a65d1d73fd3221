//! Catalog snapshot holder.

use std::sync::Arc;

use tokio::sync::RwLock;

use clockwork_domain::Catalog;

/// Single-writer / many-reader home of the current catalog snapshot.
///
/// Rebuilds construct a complete new [`Catalog`] off to the side and swap
/// the `Arc` in one step; a resolving query can never observe a
/// half-populated catalog. Readers clone the `Arc` and keep resolving
/// against their snapshot even while a swap happens underneath them.
pub struct CatalogStore {
    inner: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Starts empty; the first refresh populates it.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Catalog::empty())),
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.inner.read().await.clone()
    }

    /// Atomically replace the snapshot.
    pub async fn replace(&self, catalog: Catalog) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(catalog);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockwork_domain::{Catalog, ItemRecord};

    fn one_item_catalog(name: &str) -> Catalog {
        let mut builder = Catalog::builder();
        builder.push(ItemRecord::new(name).with_counts(1, 0, 0));
        builder.build()
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = CatalogStore::new();
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_snapshot() {
        let store = CatalogStore::new();
        store.replace(one_item_catalog("Sword of Flame")).await;
        assert!(store.snapshot().await.get("sword of flame").is_some());

        store.replace(one_item_catalog("Boots of Speed")).await;
        let snapshot = store.snapshot().await;
        assert!(snapshot.get("boots of speed").is_some());
        assert!(snapshot.get("sword of flame").is_none());
    }

    #[tokio::test]
    async fn held_snapshot_survives_a_swap() {
        let store = CatalogStore::new();
        store.replace(one_item_catalog("Sword of Flame")).await;

        let held = store.snapshot().await;
        store.replace(one_item_catalog("Boots of Speed")).await;

        // The reader's snapshot is unchanged.
        assert!(held.get("sword of flame").is_some());
    }
}
