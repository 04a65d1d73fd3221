//! Application composition.
//!
//! `App` wires the stores, ports, and use cases together and is the single
//! surface a transport talks to. It owns no behavior of its own beyond
//! delegation.

use std::sync::Arc;

use clockwork_domain::{
    resolve, CartEntry, CharacterName, MatchOutcome, Quality, Request, RequestId, UserId,
};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::{InventorySource, Notifier};
use crate::infrastructure::settings::EngineConfig;
use crate::stores::{CartStore, CatalogStore, RequestStore};
use crate::use_cases::{
    AddItem, CartError, DenyRequest, FulfillRequest, PartialRequest, RefreshCatalog,
    RefreshError, RequestError, SearchItems, SearchOutcome, SubmitCart, SubmitRequest,
};

/// The assembled engine.
pub struct App {
    catalog: Arc<CatalogStore>,
    carts: Arc<CartStore>,
    requests: Arc<RequestStore>,

    search_items: SearchItems,
    add_item: AddItem,
    submit_cart: SubmitCart,
    submit_request: SubmitRequest,
    fulfill_request: FulfillRequest,
    deny_request: DenyRequest,
    partial_request: PartialRequest,
    refresh_catalog: RefreshCatalog,
}

impl App {
    pub fn new(
        source: Arc<dyn InventorySource>,
        notifier: Arc<dyn Notifier>,
        clock: ClockHandle,
        config: EngineConfig,
    ) -> Self {
        let catalog = Arc::new(CatalogStore::new());
        let carts = Arc::new(CartStore::new());
        let requests = Arc::new(RequestStore::new());

        Self {
            search_items: SearchItems::new(catalog.clone(), config.clone()),
            add_item: AddItem::new(catalog.clone(), carts.clone()),
            submit_cart: SubmitCart::new(
                carts.clone(),
                requests.clone(),
                notifier.clone(),
                clock.clone(),
            ),
            submit_request: SubmitRequest::new(
                catalog.clone(),
                requests.clone(),
                notifier.clone(),
                clock.clone(),
            ),
            fulfill_request: FulfillRequest::new(
                requests.clone(),
                notifier.clone(),
                clock.clone(),
            ),
            deny_request: DenyRequest::new(requests.clone(), notifier.clone(), clock.clone()),
            partial_request: PartialRequest::new(requests.clone(), notifier, clock),
            refresh_catalog: RefreshCatalog::new(source, catalog.clone(), config),
            catalog,
            carts,
            requests,
        }
    }

    // ---- catalog ----

    /// Rebuild the catalog from the inventory source.
    pub async fn refresh_catalog(&self) -> Result<usize, RefreshError> {
        self.refresh_catalog.execute().await
    }

    /// Resolve a single item name against the current catalog.
    pub async fn resolve_item(&self, query: &str) -> MatchOutcome {
        let catalog = self.catalog.snapshot().await;
        resolve(&catalog, query)
    }

    /// Search the catalog by substring or spell-class query.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        self.search_items.execute(query).await
    }

    // ---- carts ----

    pub async fn add_to_cart(
        &self,
        user_id: &UserId,
        item_name: &str,
        quality: Quality,
    ) -> Result<CartEntry, CartError> {
        self.add_item.execute(user_id, item_name, quality).await
    }

    /// The user's current cart entries, in the order they were added.
    pub fn cart_contents(&self, user_id: &UserId) -> Vec<CartEntry> {
        self.carts.entries(user_id)
    }

    pub fn clear_cart(&self, user_id: &UserId) {
        self.carts.clear(user_id);
    }

    pub async fn submit_cart(
        &self,
        user_id: &UserId,
        character_name: CharacterName,
        notes: Option<String>,
    ) -> Result<Request, CartError> {
        self.submit_cart.execute(user_id, character_name, notes).await
    }

    // ---- requests ----

    pub async fn submit_request(
        &self,
        user_id: &UserId,
        character_name: CharacterName,
        text: &str,
        notes: Option<String>,
    ) -> Result<Request, RequestError> {
        self.submit_request
            .execute(user_id, character_name, text, notes)
            .await
    }

    /// Snapshot of one open request, if it is still open.
    pub fn request(&self, id: RequestId) -> Option<Request> {
        self.requests.get(id)
    }

    /// Number of requests still awaiting staff action.
    pub fn open_request_count(&self) -> usize {
        self.requests.open_count()
    }

    pub async fn fulfill_request(
        &self,
        id: RequestId,
        staff_id: UserId,
    ) -> Result<Request, RequestError> {
        self.fulfill_request.execute(id, staff_id).await
    }

    pub async fn deny_request(
        &self,
        id: RequestId,
        staff_id: UserId,
        reason: &str,
    ) -> Result<Request, RequestError> {
        self.deny_request.execute(id, staff_id, reason).await
    }

    pub async fn partial_request(
        &self,
        id: RequestId,
        staff_id: UserId,
        sent_items: &str,
        unavailable_items: &str,
    ) -> Result<Request, RequestError> {
        self.partial_request
            .execute(id, staff_id, sent_items, unavailable_items)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{
        InventorySnapshot, MockInventorySource, MockNotifier, SourceRecord,
    };

    fn app_with_inventory(records: Vec<SourceRecord>) -> App {
        let snapshot = InventorySnapshot {
            records,
            class_items: HashMap::new(),
        };
        let mut source = MockInventorySource::new();
        source
            .expect_fetch_inventory()
            .returning(move || Ok(snapshot.clone()));

        let mut notifier = MockNotifier::new();
        notifier.expect_announce_request().returning(|_| Ok(()));
        notifier.expect_publish_resolution().returning(|_| Ok(()));
        notifier.expect_notify_requester().returning(|_| Ok(()));

        App::new(
            Arc::new(source),
            Arc::new(notifier),
            Arc::new(SystemClock::new()),
            EngineConfig::default(),
        )
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn staff() -> UserId {
        UserId::new("staff-1").unwrap()
    }

    fn character() -> CharacterName {
        CharacterName::new("Mychar").unwrap()
    }

    #[tokio::test]
    async fn cart_flow_end_to_end() {
        let app = app_with_inventory(vec![
            SourceRecord::new("Sword of Flame").with_counts(2, 0, 1),
        ]);
        app.refresh_catalog().await.unwrap();

        app.add_to_cart(&user(), "Sword of Flame", Quality::Raw)
            .await
            .unwrap();
        assert_eq!(app.cart_contents(&user()).len(), 1);

        let request = app.submit_cart(&user(), character(), None).await.unwrap();
        assert!(app.cart_contents(&user()).is_empty());
        assert_eq!(app.open_request_count(), 1);

        app.fulfill_request(request.id, staff()).await.unwrap();
        assert_eq!(app.open_request_count(), 0);
        assert!(app.request(request.id).is_none());
    }

    #[tokio::test]
    async fn free_text_request_flow_end_to_end() {
        let app = app_with_inventory(vec![
            SourceRecord::new("Sword of Flame").with_counts(2, 0, 1),
        ]);
        app.refresh_catalog().await.unwrap();

        let request = app
            .submit_request(&user(), character(), "Sword of Flame (legendary)", None)
            .await
            .unwrap();
        assert_eq!(request.confirmed.len(), 1);

        let resolved = app
            .deny_request(request.id, staff(), "saving it for raids")
            .await
            .unwrap();
        assert!(!resolved.is_pending());
        assert_eq!(app.open_request_count(), 0);
    }

    #[tokio::test]
    async fn resolve_and_search_share_the_catalog() {
        let app = app_with_inventory(vec![
            SourceRecord::new("Sword of Flame").with_counts(1, 0, 0),
            SourceRecord::new("Sword of Frost").with_counts(1, 0, 0),
        ]);
        app.refresh_catalog().await.unwrap();

        assert!(matches!(
            app.resolve_item("sword of flame").await,
            MatchOutcome::Exact { .. }
        ));
        match app.search("sword").await {
            SearchOutcome::Items(items) => assert_eq!(items.len(), 2),
            other => panic!("expected items, got {:?}", other),
        }
    }
}
