//! Submit cart use case.

use std::sync::Arc;

use clockwork_domain::{CharacterName, ConfirmedItem, Request, UserId};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::Notifier;
use crate::stores::{CartStore, RequestStore};

use super::error::CartError;

/// Turn a user's cart into a pending request.
///
/// Cart entries were resolved at add time, so every one lands in the
/// confirmed bucket and the request never needs staff verification for
/// matching. Submission drains the cart atomically; the entries either
/// become a request or, on validation failure, never leave the cart.
pub struct SubmitCart {
    carts: Arc<CartStore>,
    requests: Arc<RequestStore>,
    notifier: Arc<dyn Notifier>,
    clock: ClockHandle,
}

impl SubmitCart {
    pub fn new(
        carts: Arc<CartStore>,
        requests: Arc<RequestStore>,
        notifier: Arc<dyn Notifier>,
        clock: ClockHandle,
    ) -> Self {
        Self {
            carts,
            requests,
            notifier,
            clock,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        character_name: CharacterName,
        notes: Option<String>,
    ) -> Result<Request, CartError> {
        if self.carts.entries(user_id).is_empty() {
            return Err(CartError::EmptyCart);
        }
        let entries = self.carts.take(user_id);

        let id = self.requests.next_id();
        let mut request = Request::new(
            id,
            user_id.clone(),
            character_name,
            notes,
            self.clock.now(),
        );
        request.confirmed = entries
            .into_iter()
            .map(|entry| ConfirmedItem {
                name: entry.item_name,
                quality: entry.quality,
                typed_as: None,
            })
            .collect();

        self.requests.insert(request.clone());

        // Announcement is best-effort; the request exists either way.
        if let Err(err) = self.notifier.announce_request(&request).await {
            tracing::warn!(request_id = %request.id, error = %err, "Request announcement failed");
        }

        tracing::info!(
            request_id = %request.id,
            user_id = %user_id,
            items = request.line_item_count(),
            "Cart submitted as request"
        );
        Ok(request)
    }
}
