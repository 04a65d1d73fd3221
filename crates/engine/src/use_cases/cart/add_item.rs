//! Add item use case.
//!
//! The transport's one-click add flow passes an exact catalog name (it got
//! the name from a search result); this is a keyed lookup, not a fuzzy
//! resolve.

use std::sync::Arc;

use clockwork_domain::{normalize, CartEntry, Quality, UserId};

use crate::stores::{CartStore, CatalogStore};

use super::error::CartError;

/// Add item use case.
pub struct AddItem {
    catalog: Arc<CatalogStore>,
    carts: Arc<CartStore>,
}

impl AddItem {
    pub fn new(catalog: Arc<CatalogStore>, carts: Arc<CartStore>) -> Self {
        Self { catalog, carts }
    }

    /// Append the named item to the user's cart at the given quality.
    ///
    /// The entry stores the catalog's display name, so a later submit needs
    /// no re-resolution. Duplicates are appended, never merged.
    pub async fn execute(
        &self,
        user_id: &UserId,
        item_name: &str,
        quality: Quality,
    ) -> Result<CartEntry, CartError> {
        let catalog = self.catalog.snapshot().await;
        let key = normalize(item_name);
        let Some(item) = catalog.get(&key) else {
            return Err(CartError::ItemNotFound(item_name.to_string()));
        };

        let entry = CartEntry::new(item.name.clone(), quality);
        self.carts.add(user_id, entry.clone());

        tracing::info!(
            user_id = %user_id,
            item_name = %entry.item_name,
            quality = %quality,
            "Item added to cart"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockwork_domain::{Catalog, ItemRecord};

    async fn stores() -> (Arc<CatalogStore>, Arc<CartStore>) {
        let mut builder = Catalog::builder();
        builder.push(ItemRecord::new("Sword of Flame").with_counts(2, 0, 1));
        let catalog = Arc::new(CatalogStore::new());
        catalog.replace(builder.build()).await;
        (catalog, Arc::new(CartStore::new()))
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn adds_catalog_display_name() {
        let (catalog, carts) = stores().await;
        let use_case = AddItem::new(catalog, carts.clone());

        let entry = use_case
            .execute(&user(), "sword of flame", Quality::Raw)
            .await
            .unwrap();

        assert_eq!(entry.item_name, "Sword of Flame");
        assert_eq!(carts.entries(&user()).len(), 1);
    }

    #[tokio::test]
    async fn unknown_item_is_rejected() {
        let (catalog, carts) = stores().await;
        let use_case = AddItem::new(catalog, carts.clone());

        let result = use_case
            .execute(&user(), "Imaginary Blade", Quality::Raw)
            .await;

        assert!(matches!(result, Err(CartError::ItemNotFound(_))));
        assert!(carts.entries(&user()).is_empty());
    }

    #[tokio::test]
    async fn duplicates_are_appended() {
        let (catalog, carts) = stores().await;
        let use_case = AddItem::new(catalog, carts.clone());

        use_case
            .execute(&user(), "Sword of Flame", Quality::Raw)
            .await
            .unwrap();
        use_case
            .execute(&user(), "Sword of Flame", Quality::Raw)
            .await
            .unwrap();

        assert_eq!(carts.entries(&user()).len(), 2);
    }
}
